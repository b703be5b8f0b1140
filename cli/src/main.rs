//! docpress CLI - Google Docs to WordPress post tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docpress::google::{FileOptionStore, GoogleAuth, GoogleDocsClient, OAuthConfig};
use docpress::render::{self, JsonFormat, RenderOptions};
use docpress::wordpress::{WordPressClient, WordPressConfig};
use docpress::{
    convert_file, document_id_from_url, ConvertOptions, DirectorySource, DocsParser,
    DocumentSource, Importer, MemorySink, ParseOptions, PostSink, DEFAULT_PREVIEW_LENGTH,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "docpress")]
#[command(author = "docpress contributors")]
#[command(version)]
#[command(about = "Convert Google Docs into WordPress posts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Docs JSON export to a post record (JSON)
    Convert {
        /// Docs JSON file (documents.get response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip malformed elements instead of failing
        #[arg(long)]
        lenient: bool,

        /// Maximum length of a generated excerpt
        #[arg(long, default_value = "160")]
        excerpt_length: usize,
    },

    /// Render a Docs JSON export to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Docs JSON file (documents.get response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print rendering statistics to stderr
        #[arg(long)]
        stats: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Skip malformed elements instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show a short summary of a Docs JSON export
    Preview {
        /// Docs JSON file (documents.get response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Excerpt length
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_LENGTH)]
        length: usize,
    },

    /// Manage the Google authorization
    Auth {
        #[command(subcommand)]
        action: AuthAction,

        #[command(flatten)]
        google: GoogleArgs,
    },

    /// List Google Docs, most recently modified first
    List {
        /// Number of documents to list
        #[arg(long, default_value = "10")]
        page_size: usize,

        /// Read JSON exports from a directory instead of Google Drive
        #[arg(long, value_name = "DIR")]
        from_dir: Option<PathBuf>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        google: GoogleArgs,
    },

    /// Import a document as a WordPress post
    Import {
        /// Document id or Google Docs URL
        #[arg(value_name = "ID_OR_URL")]
        document: String,

        /// Convert and print the record without publishing it
        #[arg(long)]
        dry_run: bool,

        /// Read JSON exports from a directory instead of Google Docs
        #[arg(long, value_name = "DIR")]
        from_dir: Option<PathBuf>,

        #[command(flatten)]
        google: GoogleArgs,

        #[command(flatten)]
        wordpress: WordPressArgs,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Print the Google consent URL
    Url,

    /// Exchange the code Google redirected back with
    Callback {
        /// Authorization code
        #[arg(value_name = "CODE")]
        code: String,

        /// State returned with the code
        #[arg(long)]
        state: Option<String>,
    },

    /// Show whether a usable token is stored
    Status,

    /// Revoke and forget the stored token
    Revoke,
}

#[derive(Args)]
struct GoogleArgs {
    /// OAuth client id
    #[arg(long, env = "CLIENT_GOOGLE_ID", hide_env_values = true, default_value = "")]
    client_id: String,

    /// OAuth client secret
    #[arg(long, env = "CLIENT_GOOGLE_SECRET", hide_env_values = true, default_value = "")]
    client_secret: String,

    /// OAuth redirect URI
    #[arg(
        long,
        env = "DOCPRESS_REDIRECT_URI",
        default_value = "http://localhost:8080/callback"
    )]
    redirect_uri: String,

    /// File holding the token and OAuth state
    #[arg(long, env = "DOCPRESS_STORE", default_value = "docpress-options.json")]
    store: PathBuf,
}

impl GoogleArgs {
    fn auth(&self) -> docpress::Result<GoogleAuth<FileOptionStore>> {
        let config = OAuthConfig::new(&self.client_id, &self.client_secret, &self.redirect_uri);
        GoogleAuth::new(config, FileOptionStore::new(&self.store))
    }

    fn docs_client(&self) -> docpress::Result<GoogleDocsClient> {
        GoogleDocsClient::from_auth(&mut self.auth()?)
    }
}

#[derive(Args)]
struct WordPressArgs {
    /// WordPress site URL
    #[arg(long = "wp-url", env = "WORDPRESS_URL", default_value = "")]
    url: String,

    /// WordPress user owning the application password
    #[arg(long = "wp-user", env = "WORDPRESS_USER", default_value = "")]
    user: String,

    /// WordPress application password
    #[arg(
        long = "wp-app-password",
        env = "WORDPRESS_APP_PASSWORD",
        hide_env_values = true,
        default_value = ""
    )]
    app_password: String,
}

impl WordPressArgs {
    fn client(&self) -> docpress::Result<WordPressClient> {
        WordPressClient::new(WordPressConfig::new(&self.url, &self.user, &self.app_password))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            compact,
            lenient,
            excerpt_length,
        } => cmd_convert(&input, output.as_deref(), compact, lenient, excerpt_length),
        Commands::Markdown {
            input,
            output,
            stats,
            max_heading,
            lenient,
        } => cmd_markdown(&input, output.as_deref(), stats, max_heading, lenient),
        Commands::Preview { input, length } => cmd_preview(&input, length),
        Commands::Auth { action, google } => cmd_auth(action, &google),
        Commands::List {
            page_size,
            from_dir,
            json,
            google,
        } => cmd_list(page_size, from_dir.as_deref(), json, &google),
        Commands::Import {
            document,
            dry_run,
            from_dir,
            google,
            wordpress,
        } => cmd_import(&document, dry_run, from_dir.as_deref(), &google, &wordpress),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(lenient: bool) -> ParseOptions {
    if lenient {
        ParseOptions::new().lenient()
    } else {
        ParseOptions::new()
    }
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn print_diagnostics(diagnostics: &[String]) {
    for diagnostic in diagnostics {
        eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lenient: bool,
    excerpt_length: usize,
) -> CliResult {
    let options = ConvertOptions::new()
        .with_parse_options(parse_options(lenient))
        .with_excerpt_length(excerpt_length);
    let outcome = convert_file(input, &options)?;
    print_diagnostics(outcome.diagnostics());

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&outcome, format)?;

    write_output(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    stats: bool,
    max_heading: u8,
    lenient: bool,
) -> CliResult {
    let parsed = DocsParser::open_with_options(input, parse_options(lenient))?.parse()?;
    print_diagnostics(&parsed.diagnostics);

    let render_options = RenderOptions::new().with_max_heading(max_heading);
    let result = render::to_markdown_with_stats(&parsed.document, &render_options);

    write_output(output, &result.content)?;

    if stats {
        let s = &result.stats;
        eprintln!();
        eprintln!("{}", "Statistics".cyan().bold());
        eprintln!("{}", "─".repeat(40).dimmed());
        eprintln!("{}: {}", "Paragraphs".bold(), s.paragraph_count);
        eprintln!("{}: {}", "Headings".bold(), s.heading_count);
        eprintln!("{}: {}", "Tables".bold(), s.table_count);
        eprintln!("{}: {}", "Images".bold(), s.image_count);
        eprintln!("{}: {}", "Skipped TOCs".bold(), s.skipped_toc_count);
        eprintln!("{}: {}", "Words".bold(), s.word_count);
    }

    Ok(())
}

fn cmd_preview(input: &Path, length: usize) -> CliResult {
    let parsed = DocsParser::open_with_options(input, ParseOptions::new().lenient())?.parse()?;
    print_diagnostics(&parsed.diagnostics);

    let preview = docpress::preview(&parsed.document, length);

    println!("{}", preview.title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", preview.excerpt);
    println!();
    if !preview.categories.is_empty() {
        println!("{}: {}", "Categories".bold(), preview.categories.join(", "));
    }
    if !preview.tags.is_empty() {
        println!("{}: {}", "Tags".bold(), preview.tags.join(", "));
    }
    println!("{}: {}", "Words".bold(), preview.word_count);
    println!(
        "{}: {}",
        "Importable".bold(),
        if docpress::can_import(&parsed.document) {
            "Yes"
        } else {
            "No (missing title)"
        }
    );

    Ok(())
}

fn cmd_auth(action: AuthAction, google: &GoogleArgs) -> CliResult {
    let mut auth = google.auth()?;

    match action {
        AuthAction::Url => {
            let url = auth.auth_url()?;
            println!("{}", "Open this URL to authorize docpress:".cyan());
            println!("{}", url);
        }
        AuthAction::Callback { code, state } => {
            if auth.handle_callback(&code, state.as_deref()) {
                println!("{}", "Google authentication succeeded".green().bold());
            } else {
                return Err("Google authentication failed (run with RUST_LOG=warn for details)".into());
            }
        }
        AuthAction::Status => match auth.token_info() {
            Some(info) => {
                println!("{}", "Authenticated".green().bold());
                if let Some(expires_at) = info.expires_at {
                    println!("{}: {}", "Expires".bold(), expires_at);
                }
                for scope in info.scopes {
                    println!("{}: {}", "Scope".bold(), scope);
                }
            }
            None => println!("{}", "Not authenticated".yellow()),
        },
        AuthAction::Revoke => {
            auth.revoke_access();
            println!("{}", "Access revoked".green());
        }
    }

    Ok(())
}

fn cmd_list(
    page_size: usize,
    from_dir: Option<&Path>,
    json: bool,
    google: &GoogleArgs,
) -> CliResult {
    let documents = match from_dir {
        Some(dir) => DirectorySource::new(dir).list_documents(page_size)?,
        None => {
            let pb = spinner("Listing documents...");
            let listed = google
                .docs_client()
                .and_then(|client| client.list_documents(page_size));
            pb.finish_and_clear();
            listed?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    if documents.is_empty() {
        println!("{}", "No documents found".yellow());
        return Ok(());
    }

    for doc in documents {
        let modified = doc
            .modified_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}  {}  {}",
            doc.id.dimmed(),
            modified.dimmed(),
            doc.name.bold()
        );
    }

    Ok(())
}

fn cmd_import(
    document: &str,
    dry_run: bool,
    from_dir: Option<&Path>,
    google: &GoogleArgs,
    wordpress: &WordPressArgs,
) -> CliResult {
    let id = document_id_from_url(document)
        .ok_or_else(|| format!("Could not extract document ID from: {}", document))?;
    log::debug!("Resolved document id {} from {:?}", id, document);

    match (from_dir, dry_run) {
        (Some(dir), true) => import_with(DirectorySource::new(dir), MemorySink::new(), &id, true),
        (Some(dir), false) => import_with(DirectorySource::new(dir), wordpress.client()?, &id, false),
        (None, true) => import_with(google.docs_client()?, MemorySink::new(), &id, true),
        (None, false) => import_with(google.docs_client()?, wordpress.client()?, &id, false),
    }
}

fn import_with<S: DocumentSource, P: PostSink>(
    source: S,
    sink: P,
    id: &str,
    dry_run: bool,
) -> CliResult {
    let mut importer = Importer::new(source, sink);

    if dry_run {
        let pb = spinner("Converting document...");
        let outcome = importer.document_content(id);
        pb.finish_and_clear();

        let outcome = outcome?;
        print_diagnostics(outcome.diagnostics());
        println!("{}", render::to_json(&outcome.record, JsonFormat::Pretty)?);
        return Ok(());
    }

    let pb = spinner("Importing document...");
    let report = importer.import(id);
    pb.finish_and_clear();

    let report = report?;
    print_diagnostics(&report.diagnostics);

    println!("{} {}", "Imported".green().bold(), report.title);
    println!("  {} post {}", "├─".dimmed(), report.post.id);
    println!("  {} status {}", "├─".dimmed(), report.post.status);
    println!(
        "  {} {}",
        "└─".dimmed(),
        report.post.link.as_deref().unwrap_or("(no link)")
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Google Docs to WordPress post tool");
    println!();
    println!("License: MIT");
}
