//! gitgutter CLI - Main entry point

mod cli;
mod output;
mod server;

use clap::{Parser, Subcommand, ValueEnum};
use gitgutter_core::{FileFilter, SearchRequest};
use gitgutter_foundation::GitGutterConfig;
use gitgutter_provider::{GitHubClient, SearchSort, SortDirection};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// gitgutter - GitHub code search, file history and reference analysis
#[derive(Parser, Debug)]
#[command(name = "gitgutter")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// GitHub token (overrides env and config)
    #[arg(long, global = true)]
    token: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search code across GitHub
    Search {
        /// Search terms
        query: String,

        /// Restrict results to a language
        #[arg(short, long)]
        language: Option<String>,

        /// Result ordering
        #[arg(short, long, value_enum, default_value_t = SortArg::BestMatch)]
        sort: SortArg,

        /// Sort direction (only used with --sort indexed)
        #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
        order: OrderArg,

        /// Number of results
        #[arg(short = 'n', long)]
        per_page: Option<u32>,

        /// Only these extensions (comma separated)
        #[arg(long, conflicts_with = "exclude")]
        include: Option<String>,

        /// Skip these extensions (comma separated)
        #[arg(long)]
        exclude: Option<String>,

        /// List env/config files of each repository
        #[arg(long)]
        config_files: bool,
    },
    /// Show commits that touched a file
    History {
        /// Repository (owner/name)
        repository: String,

        /// File path inside the repository
        path: String,

        /// Number of commits
        #[arg(short, long)]
        max: Option<u32>,
    },
    /// List a repository directory
    Tree {
        /// Repository (owner/name)
        repository: String,

        /// Directory path (repository root when omitted)
        #[arg(default_value = "")]
        path: String,
    },
    /// Print a file
    Show {
        /// Repository (owner/name)
        repository: String,

        /// File path inside the repository
        path: String,
    },
    /// Find declarations, renames and usages of an identifier
    Analyze {
        /// Repository (owner/name)
        repository: String,

        /// Identifier to look for
        search: String,

        /// File the search started from
        #[arg(short, long)]
        file: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the web API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    BestMatch,
    Indexed,
}

impl From<SortArg> for SearchSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::BestMatch => SearchSort::BestMatch,
            SortArg::Indexed => SearchSort::Indexed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Desc,
    Asc,
}

impl From<OrderArg> for SortDirection {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Desc => SortDirection::Desc,
            OrderArg::Asc => SortDirection::Asc,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging (stdout 은 결과 출력용)
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // 설정: 파일 → 환경변수 → 명령행
    let mut config = GitGutterConfig::load()?;
    if let Some(token) = args.token {
        config = config.with_token(token);
    }
    if let Some(url) = args.api_url {
        config = config.with_base_url(url.trim_end_matches('/'));
    }
    if !config.github.has_token() {
        warn!("No GitHub token configured, requests are sent unauthenticated");
    }

    let client = GitHubClient::new(&config.github)?;
    let limits = &config.limits;

    match args.command {
        Command::Search {
            query,
            language,
            sort,
            order,
            per_page,
            include,
            exclude,
            config_files,
        } => {
            let filter = match (include, exclude) {
                (Some(exts), _) => FileFilter::from_parts("include", &exts),
                (None, Some(exts)) => FileFilter::from_parts("exclude", &exts),
                (None, None) => FileFilter::None,
            };
            let mut request = SearchRequest::new(query)
                .filter(filter)
                .sort(sort.into())
                .order(order.into())
                .per_page(limits.clamp_per_page(per_page.unwrap_or(limits.per_page)))
                .with_config_files(config_files);
            if let Some(language) = language {
                request = request.language(language);
            }
            cli::search(&client, limits, &request).await?;
        }
        Command::History {
            repository,
            path,
            max,
        } => {
            cli::history(&client, limits, &repository, &path, max).await?;
        }
        Command::Tree { repository, path } => {
            cli::tree(&client, &repository, &path).await?;
        }
        Command::Show { repository, path } => {
            cli::show(&client, &repository, &path).await?;
        }
        Command::Analyze {
            repository,
            search,
            file,
            json,
        } => {
            cli::analyze(&client, &repository, &search, file.as_deref(), json).await?;
        }
        Command::Serve { host, port } => {
            let mut server_config = config.server.clone();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            let state = server::AppState::new(client, config.limits.clone());
            server::serve(state, &server_config.bind_addr()).await?;
        }
    }

    Ok(())
}
