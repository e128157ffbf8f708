//! Clap derive structures for the `backlot` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// backlot -- manage the Backlot content platform from the command line
#[derive(Debug, Parser)]
#[command(
    name = "backlot",
    version,
    about = "Manage Backlot catalog content from the command line",
    long_about = "Administer the Backlot content platform: brands, categories,\n\
        rental equipment, news articles, and staff. Talks to the same\n\
        REST API as the staff dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "BACKLOT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "BACKLOT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API token
    #[arg(long, env = "BACKLOT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BACKLOT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "BACKLOT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "BACKLOT_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared list options ──────────────────────────────────────────────

/// Flags shared by every `list` subcommand. These seed the list
/// controller's URL state, so they accept exactly what the dashboard
/// puts in its query string.
#[derive(Debug, Args)]
pub struct ListOpts {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size (default is resource-specific)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Search term
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Extra filter as KEY=VALUE (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage equipment brands
    #[command(alias = "br")]
    Brands(BrandsArgs),

    /// Manage catalog categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Manage rental equipment
    #[command(alias = "eq")]
    Equipment(EquipmentArgs),

    /// Manage news articles
    #[command(alias = "art")]
    Articles(ArticlesArgs),

    /// Manage staff members
    Staff(StaffArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Brands ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BrandsArgs {
    #[command(subcommand)]
    pub command: BrandsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BrandsCommand {
    /// List brands
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Only active (or only inactive) brands
        #[arg(long)]
        active: Option<bool>,
    },

    /// Show a single brand
    Get {
        /// Brand id
        id: String,
    },

    /// Create a brand
    Create {
        #[arg(long)]
        name: String,

        /// URL slug (derived from the name when omitted)
        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        logo_url: Option<String>,

        /// Create as inactive (hidden from the public site)
        #[arg(long)]
        inactive: bool,
    },

    /// Update a brand
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        logo_url: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a brand
    #[command(alias = "rm")]
    Delete {
        id: String,
    },
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by kind (EQUIPMENT or ARTICLE)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Show a single category
    Get { id: String },

    /// Create a category
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        slug: Option<String>,

        /// EQUIPMENT or ARTICLE
        #[arg(long, default_value = "EQUIPMENT")]
        kind: String,
    },

    /// Update a category
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        kind: Option<String>,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Equipment ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EquipmentArgs {
    #[command(subcommand)]
    pub command: EquipmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// List equipment
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by status (AVAILABLE, RENTED, MAINTENANCE, RETIRED)
        #[arg(long)]
        status: Option<String>,

        /// Filter by brand id
        #[arg(long)]
        brand: Option<String>,

        /// Only active (or only inactive) units
        #[arg(long)]
        active: Option<bool>,
    },

    /// Show a single equipment unit
    Get { id: String },

    /// Create an equipment unit
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        brand: Option<i64>,

        #[arg(long)]
        category: Option<i64>,

        #[arg(long, default_value = "AVAILABLE")]
        status: String,

        /// Daily rental rate in cents
        #[arg(long)]
        daily_rate: Option<i64>,

        #[arg(long)]
        inactive: bool,
    },

    /// Update an equipment unit
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        brand: Option<i64>,

        #[arg(long)]
        category: Option<i64>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        daily_rate: Option<i64>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete an equipment unit
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Articles ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ArticlesArgs {
    #[command(subcommand)]
    pub command: ArticlesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ArticlesCommand {
    /// List articles
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by status (DRAFT, PUBLISHED, ARCHIVED)
        #[arg(long)]
        status: Option<String>,

        /// Filter by locale (e.g. en, ar)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show a single article
    Get { id: String },

    /// Create an article
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long, default_value = "DRAFT")]
        status: String,

        #[arg(long)]
        locale: Option<String>,

        /// Article body (markdown)
        #[arg(long)]
        body: Option<String>,
    },

    /// Update an article
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        locale: Option<String>,

        #[arg(long)]
        body: Option<String>,
    },

    /// Delete an article
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Staff ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List staff members
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Only active (or only inactive) members
        #[arg(long)]
        active: Option<bool>,
    },

    /// Show a single staff member
    Get { id: String },

    /// Create a staff member
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        role: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        inactive: bool,
    },

    /// Update a staff member
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a staff member
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the resolved configuration (tokens redacted)
    Show,

    /// Create or update a profile
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// API base URL
        #[arg(long)]
        api_url: String,

        /// Environment variable to read the token from
        #[arg(long)]
        token_env: Option<String>,
    },

    /// Store an API token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// The token value
        token: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
