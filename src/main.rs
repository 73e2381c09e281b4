use anyhow::Result;
use clap::Parser;
use log::error;
use paperless_deploy::{
    config::Config,
    github::GitHubRepo,
    paperless::paperless_repo,
    platform::Arch,
    release::DEFAULT_EXTENSION,
    runtime::RealRuntime,
    system::{self, PackageSpec},
};
use std::path::PathBuf;
use std::process::ExitCode;

/// paperless-deploy - Paperless-ngx deployment helper
///
/// Host probes and release downloads for the tooling that installs and
/// upgrades Paperless-ngx.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   paperless-deploy releases            # List Paperless-ngx release tags
///   paperless-deploy fetch v2.7.2        # Download the v2.7.2 .tar.xz archive
#[derive(Parser, Debug)]
#[command(author, version = env!("PAPERLESS_DEPLOY_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "PAPERLESS_DEPLOY_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the CPU architecture family (arm or other)
    Arch(ArchArgs),

    /// Exit 0 if a local user exists, 1 if not, 2 if the lookup failed
    UserExists(UserExistsArgs),

    /// Refresh the apt package cache
    AptUpdate,

    /// Install packages needed to satisfy dependency specifications
    AptSatisfy(AptSatisfyArgs),

    /// List release tags of a GitHub project
    Releases(ReleasesArgs),

    /// Download a release asset
    Fetch(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct ArchArgs {
    /// Print nothing; exit 0 on ARM, 1 otherwise
    #[arg(long)]
    pub is_arm: bool,
}

#[derive(clap::Args, Debug)]
pub struct UserExistsArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct AptSatisfyArgs {
    /// Dependency specifications, e.g. "python3 (>= 3.9)"
    #[arg(value_name = "SPEC", required = true)]
    pub specs: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ReleasesArgs {
    /// The GitHub repository in the format "owner/repo" (defaults to paperless-ngx)
    #[arg(value_name = "OWNER/REPO")]
    pub repo: Option<GitHubRepo>,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Release tag, e.g. v2.7.2
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// The GitHub repository in the format "owner/repo" (defaults to paperless-ngx)
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<GitHubRepo>,

    /// Pick the first asset whose name ends with this
    #[arg(long, short = 'e', value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Write the asset here instead of a new temporary file
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl AptSatisfyArgs {
    fn package_spec(self) -> PackageSpec {
        let mut specs = self.specs;
        if specs.len() == 1 {
            PackageSpec::Single(specs.remove(0))
        } else {
            PackageSpec::Many(specs)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::Arch(args) => {
            let arch = Arch::detect(&runtime);
            if args.is_arm {
                return Ok(exit_status(arch == Arch::Arm));
            }
            println!("{}", arch);
        }
        Commands::UserExists(args) => match system::user_exists(&runtime, &args.name) {
            Ok(exists) => return Ok(exit_status(exists)),
            Err(err) => {
                error!("Could not look up user {:?}: {:#}", args.name, err);
                return Ok(ExitCode::from(LOOKUP_FAILED));
            }
        },
        Commands::AptUpdate => system::update_package_cache(&runtime)?,
        Commands::AptSatisfy(args) => {
            system::satisfy_packages(&runtime, args.package_spec())?
        }
        Commands::Releases(args) => {
            let config = Config::new(runtime, cli.api_url)?;
            let repo = args.repo.unwrap_or_else(paperless_repo);
            for tag in config.fetcher().list_releases(&repo).await? {
                println!("{}", tag);
            }
        }
        Commands::Fetch(args) => {
            let config = Config::new(runtime, cli.api_url)?;
            let repo = args.repo.unwrap_or_else(paperless_repo);
            let path = config
                .fetcher()
                .fetch_release_asset(&repo, &args.tag, &args.extension, args.output.as_deref())
                .await?;
            println!("{}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit code of `user-exists` when `getent` could not be run at all.
const LOOKUP_FAILED: u8 = 2;

fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_arch_parsing() {
        let cli = Cli::try_parse_from(["paperless-deploy", "arch", "--is-arm"]).unwrap();
        match cli.command {
            Commands::Arch(args) => assert!(args.is_arm),
            _ => panic!("Expected Arch command"),
        }
    }

    #[test]
    fn test_cli_user_exists_parsing() {
        let cli = Cli::try_parse_from(["paperless-deploy", "user-exists", "paperless"]).unwrap();
        match cli.command {
            Commands::UserExists(args) => assert_eq!(args.name, "paperless"),
            _ => panic!("Expected UserExists command"),
        }
    }

    #[test]
    fn test_cli_apt_satisfy_single_and_many() {
        let cli =
            Cli::try_parse_from(["paperless-deploy", "apt-satisfy", "python3 (>= 3.9)"]).unwrap();
        match cli.command {
            Commands::AptSatisfy(args) => assert_eq!(
                args.package_spec(),
                PackageSpec::Single("python3 (>= 3.9)".to_string())
            ),
            _ => panic!("Expected AptSatisfy command"),
        }

        let cli = Cli::try_parse_from(["paperless-deploy", "apt-satisfy", "a", "b"]).unwrap();
        match cli.command {
            Commands::AptSatisfy(args) => {
                assert_eq!(args.package_spec().to_argument(), "a, b")
            }
            _ => panic!("Expected AptSatisfy command"),
        }
    }

    #[test]
    fn test_cli_apt_satisfy_requires_spec() {
        assert!(Cli::try_parse_from(["paperless-deploy", "apt-satisfy"]).is_err());
    }

    #[test]
    fn test_cli_releases_parsing() {
        let cli = Cli::try_parse_from(["paperless-deploy", "releases"]).unwrap();
        match cli.command {
            Commands::Releases(args) => assert_eq!(args.repo, None),
            _ => panic!("Expected Releases command"),
        }

        let cli = Cli::try_parse_from(["paperless-deploy", "releases", "owner/repo"]).unwrap();
        match cli.command {
            Commands::Releases(args) => {
                assert_eq!(args.repo, Some(GitHubRepo::new("owner", "repo")))
            }
            _ => panic!("Expected Releases command"),
        }
    }

    #[test]
    fn test_cli_releases_invalid_repo_fails() {
        assert!(Cli::try_parse_from(["paperless-deploy", "releases", "not-a-repo"]).is_err());
    }

    #[test]
    fn test_cli_fetch_defaults() {
        let cli = Cli::try_parse_from(["paperless-deploy", "fetch", "v2.7.2"]).unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.tag, "v2.7.2");
                assert_eq!(args.repo, None);
                assert_eq!(args.extension, ".tar.xz");
                assert_eq!(args.output, None);
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_cli_fetch_options() {
        let cli = Cli::try_parse_from([
            "paperless-deploy",
            "fetch",
            "v1.0.0",
            "--repo",
            "owner/repo",
            "-e",
            ".zip",
            "-o",
            "/tmp/out.zip",
            "--api-url",
            "http://localhost:1234",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:1234"));
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.repo, Some(GitHubRepo::new("owner", "repo")));
                assert_eq!(args.extension, ".zip");
                assert_eq!(args.output, Some(PathBuf::from("/tmp/out.zip")));
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["paperless-deploy"]).is_err());
    }
}
