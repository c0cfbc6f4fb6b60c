use clap::{Args, CommandFactory, Parser, Subcommand};
use once_cell::sync::Lazy;
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds.
static VERSION_STRING: Lazy<String> = Lazy::new(|| {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    if IS_RELEASE == "true" || GIT_HASH.is_empty() {
        VERSION.to_string()
    } else {
        format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
    }
});

fn get_version() -> &'static str {
    VERSION_STRING.as_str()
}

#[derive(Parser, Debug)]
#[command(
    name = "autopulse",
    bin_name = "autopulse",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Automotive news publishing toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $AUTOPULSE_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Admin passphrase (defaults to $AUTOPULSE_PASSPHRASE)
    #[arg(long, global = true, value_name = "PASS", help_heading = "Options")]
    pub passphrase: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Reader,
    Admin,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Reader => "Reader Commands:",
            CommandGroup::Admin => "Admin Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "show" | "route" => Some(CommandGroup::Reader),
            "create" | "edit" | "delete" | "generate" => Some(CommandGroup::Admin),
            "export" | "import" | "sitemap" => Some(CommandGroup::Data),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Reader,
            CommandGroup::Admin,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("autopulse {version}\n"));
    output.push_str("Automotive news publishing toolkit\n");
    output.push('\n');
    output.push_str("Usage: autopulse [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", sc.get_name(), about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <DIR>     Data directory\n");
    output.push_str("      --passphrase <PASS>  Admin passphrase\n");
    output.push_str("  -v, --verbose            Verbose output\n");
    output.push_str("  -h, --help               Print help\n");
    output.push_str("  -V, --version            Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Name of the subcommand as clap knows it
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Reader(c) => match c {
            ReaderCommands::List { .. } => "list",
            ReaderCommands::Show { .. } => "show",
            ReaderCommands::Route { .. } => "route",
        },
        Commands::Admin(c) => match c {
            AdminCommands::Create { .. } => "create",
            AdminCommands::Edit { .. } => "edit",
            AdminCommands::Delete { .. } => "delete",
            AdminCommands::Generate { .. } => "generate",
        },
        Commands::Data(c) => match c {
            DataCommands::Export { .. } => "export",
            DataCommands::Import { .. } => "import",
            DataCommands::Sitemap { .. } => "sitemap",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
    }
}

pub fn print_subcommand_help(command: &Option<Commands>) {
    match command {
        Some(command) => print_help_for_command(command_name(command)),
        None => print_grouped_help(),
    }
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Reader(ReaderCommands),

    #[command(flatten)]
    Admin(AdminCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum ReaderCommands {
    /// List published articles (featured first)
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only articles in this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Search titles and keywords
        #[arg(short, long)]
        search: Option<String>,

        /// Admin table: every article including drafts (needs the passphrase)
        #[arg(long)]
        all: bool,
    },

    /// Show an article by slug
    #[command(alias = "v", display_order = 2)]
    Show {
        slug: String,

        /// Print the rendered document head instead of the article
        #[arg(long)]
        head: bool,
    },

    /// Resolve a site path such as /#/post/<slug>
    #[command(display_order = 3)]
    Route { path: String },
}

/// Article fields shared by `create` and `edit`
#[derive(Args, Debug, Default)]
pub struct ArticleFields {
    #[arg(short, long)]
    pub title: Option<String>,

    /// Content markup
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read content from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,

    /// Treat content as Markdown and convert it to HTML
    #[arg(long)]
    pub markdown: bool,

    /// Explicit slug (derived from the title when omitted)
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub meta_description: Option<String>,

    /// Comma-separated keywords
    #[arg(short, long)]
    pub keywords: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// Publication instant (ISO-8601)
    #[arg(long)]
    pub date: Option<String>,

    /// Thumbnail URL
    #[arg(long)]
    pub thumbnail: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Create an article
    #[command(alias = "n", display_order = 10)]
    Create {
        #[command(flatten)]
        fields: ArticleFields,

        /// Save as an unpublished draft
        #[arg(long)]
        draft: bool,
    },

    /// Edit an article by id or slug
    #[command(alias = "e", display_order = 11)]
    Edit {
        id_or_slug: String,

        #[command(flatten)]
        fields: ArticleFields,

        #[arg(long, conflicts_with = "unpublish")]
        publish: bool,

        #[arg(long)]
        unpublish: bool,
    },

    /// Delete an article by id or slug
    #[command(alias = "rm", display_order = 12)]
    Delete {
        id_or_slug: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Add an AI-drafted article from a provider response
    #[command(display_order = 13)]
    Generate {
        /// Provider response document ("-" for stdin)
        #[arg(long, value_name = "FILE", required_unless_present = "print_request")]
        response: Option<PathBuf>,

        /// Print the request body to send to the provider and exit
        #[arg(long)]
        print_request: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export all articles as JSON
    #[command(display_order = 20)]
    Export {
        #[arg(short, long, value_name = "PATH", default_value = "posts.json")]
        output: PathBuf,
    },

    /// Replace all articles with a JSON export
    #[command(display_order = 21)]
    Import { path: PathBuf },

    /// Write sitemap.xml for published articles
    #[command(display_order = 22)]
    Sitemap {
        #[arg(short, long, value_name = "PATH", default_value = "sitemap.xml")]
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g. site-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for autopulse or a subcommand
    #[command(display_order = 31)]
    Help { command: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_commands() {
        let cli = Cli::try_parse_from(["autopulse", "list", "--category", "EV"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Reader(ReaderCommands::List { category: Some(_), .. }))
        ));

        let cli = Cli::try_parse_from([
            "autopulse",
            "--data-dir",
            "/tmp/x",
            "create",
            "--title",
            "T",
            "--content",
            "C",
            "--draft",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Admin(AdminCommands::Create { fields, draft })) => {
                assert_eq!(fields.title.as_deref(), Some("T"));
                assert!(draft);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn content_sources_conflict() {
        assert!(Cli::try_parse_from([
            "autopulse",
            "create",
            "--content",
            "C",
            "--content-file",
            "c.html"
        ])
        .is_err());
    }

    #[test]
    fn generate_needs_a_response_or_print_request() {
        assert!(Cli::try_parse_from(["autopulse", "generate"]).is_err());
        assert!(Cli::try_parse_from(["autopulse", "generate", "--print-request"]).is_ok());
    }

    #[test]
    fn grouped_help_lists_every_group() {
        let help = get_grouped_help();
        for group in CommandGroup::all() {
            assert!(help.contains(group.heading()));
        }
        assert!(help.contains("sitemap"));
    }

    #[test]
    fn search_help_names_matched_fields() {
        let cmd = Cli::command();
        let list = cmd.find_subcommand("list").unwrap();
        let search = list
            .get_arguments()
            .find(|arg| arg.get_id() == "search")
            .unwrap();
        assert_eq!(
            search.get_help().unwrap().to_string(),
            "Search titles and keywords"
        );
    }
}
