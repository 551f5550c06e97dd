//! Repository Browsing - 커밋 히스토리, 디렉토리 트리, 파일 내용

mod history;
mod tree;

pub use history::{commit_history, CommitEntry, SHORT_SHA_LEN};
pub use tree::{read_file, repository_tree, sort_tree};
