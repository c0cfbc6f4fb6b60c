//! # CLI Layer
//!
//! One UI client for AutoPulse. This is the only place that reads stdin, writes
//! to stdout/stderr, prompts, or decides exit codes.
//!
//! - `run()`: parses arguments and dispatches (called by `main.rs`)
//! - `init_context()`: resolves the data directory, loads config and the store
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! Admin commands obtain an `AdminSession` from `--passphrase`,
//! `AUTOPULSE_PASSPHRASE`, or an interactive prompt.

use super::render::{print_admin_table, print_article, print_listing, print_messages};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, AdminCommands,
    ArticleFields, Cli, Commands, DataCommands, MiscCommands, ReaderCommands,
};
use autopulse::api::{AutopulseApi, CmdResult, ConfigAction};
use autopulse::auth::AdminSession;
use autopulse::config::{SiteConfig, CONFIG_KEYS};
use autopulse::draft::{draft_request, ResponseDraftSource, ResponseInput};
use autopulse::error::{AutopulseError, Result};
use autopulse::logging;
use autopulse::model::{parse_keywords, ArticleForm};
use autopulse::route::Route;
use autopulse::store::fs::FileStorage;
use clap::Parser;
use directories::ProjectDirs;
use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOME_ENV: &str = "AUTOPULSE_HOME";
pub const PASSPHRASE_ENV: &str = "AUTOPULSE_PASSPHRASE";

struct AppContext {
    api: AutopulseApi<FileStorage>,
    passphrase: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        print_subcommand_help(&cli.command);
        return Ok(());
    }
    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        handle_help(command.as_deref());
        return Ok(());
    }

    logging::init(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Reader(cmd)) => match cmd {
            ReaderCommands::List {
                category,
                search,
                all,
            } => handle_list(&ctx, category, search, all),
            ReaderCommands::Show { slug, head } => handle_show(&ctx, &slug, head),
            ReaderCommands::Route { path } => handle_route(&ctx, &path),
        },
        Some(Commands::Admin(cmd)) => match cmd {
            AdminCommands::Create { fields, draft } => handle_create(&mut ctx, fields, draft),
            AdminCommands::Edit {
                id_or_slug,
                fields,
                publish,
                unpublish,
            } => {
                let published = match (publish, unpublish) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                handle_edit(&mut ctx, &id_or_slug, fields, published)
            }
            AdminCommands::Delete { id_or_slug, yes } => handle_delete(&mut ctx, &id_or_slug, yes),
            AdminCommands::Generate {
                response,
                print_request,
            } => handle_generate(&mut ctx, response, print_request),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Export { output } => handle_export(&ctx, &output),
            DataCommands::Import { path } => handle_import(&mut ctx, &path),
            DataCommands::Sitemap { output } => handle_sitemap(&ctx, &output),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
            MiscCommands::Help { command } => {
                handle_help(command.as_deref());
                Ok(())
            }
        },
        None => handle_list(&ctx, None, None, false),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "autopulse")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AutopulseError::Api("Could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = SiteConfig::load(&data_dir)?;
    let storage = FileStorage::new(data_dir.clone())
        .with_storage_key(&config.storage_key)
        .with_seed_path(config.seed_path.clone());

    let api = AutopulseApi::new(storage, config, data_dir);
    debug!(source = ?api.load_source(), "article collection loaded");

    let passphrase = cli
        .passphrase
        .clone()
        .or_else(|| std::env::var(PASSPHRASE_ENV).ok());

    Ok(AppContext { api, passphrase })
}

fn session(ctx: &AppContext) -> Result<AdminSession> {
    if let Some(passphrase) = &ctx.passphrase {
        return ctx.api.login(passphrase);
    }
    if !std::io::stdin().is_terminal() {
        return Err(AutopulseError::Unauthorized(format!(
            "Admin passphrase required (--passphrase or {})",
            PASSPHRASE_ENV
        )));
    }
    let attempt = prompt("Admin passphrase: ")?;
    ctx.api.login(&attempt)
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush().map_err(AutopulseError::Io)?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(AutopulseError::Io)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn handle_list(
    ctx: &AppContext,
    category: Option<String>,
    search: Option<String>,
    all: bool,
) -> Result<()> {
    if all {
        let session = session(ctx)?;
        let result = ctx.api.admin_articles(&session)?;
        print_admin_table(&result.listed_articles);
        print_messages(&result.messages);
        return Ok(());
    }

    let result = ctx
        .api
        .list_articles(category.as_deref(), search.as_deref().unwrap_or(""))?;
    print_result_listing(&result);
    Ok(())
}

fn print_result_listing(result: &CmdResult) {
    print_listing(result.featured.as_ref(), &result.listed_articles);
    print_messages(&result.messages);
}

fn handle_show(ctx: &AppContext, slug: &str, head: bool) -> Result<()> {
    let result = ctx.api.view_article(slug)?;
    print_detail(&result, head)
}

fn print_detail(result: &CmdResult, head: bool) -> Result<()> {
    match (head, &result.head) {
        (true, Some(doc)) => print!("{}", doc.render_html()?),
        _ => {
            if let Some(article) = result.affected_articles.first() {
                print_article(article);
            }
        }
    }
    Ok(())
}

fn handle_route(ctx: &AppContext, path: &str) -> Result<()> {
    let route: Route = path.parse()?;
    match &route {
        Route::Admin => {
            let session = session(ctx)?;
            let result = ctx.api.resolve_route(&route, Some(&session))?;
            print_admin_table(&result.listed_articles);
            print_messages(&result.messages);
        }
        Route::Post(_) => {
            let result = ctx.api.resolve_route(&route, None)?;
            print_detail(&result, false)?;
        }
        Route::Home | Route::Category(_) => {
            let result = ctx.api.resolve_route(&route, None)?;
            print_result_listing(&result);
        }
    }
    Ok(())
}

fn read_content(fields: &ArticleFields) -> Result<Option<String>> {
    let raw = match (&fields.content, &fields.content_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(AutopulseError::Io)?;
            Some(buffer)
        }
        (None, Some(path)) => Some(std::fs::read_to_string(path).map_err(AutopulseError::Io)?),
        (None, None) => None,
    };

    Ok(match raw {
        Some(text) if fields.markdown => Some(markdown_to_html(&text)),
        other => other,
    })
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new(markdown);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Overwrites the form fields that were given on the command line.
fn apply_fields(form: &mut ArticleForm, fields: ArticleFields) -> Result<()> {
    if let Some(content) = read_content(&fields)? {
        form.content = Some(content);
    }
    let ArticleFields {
        title,
        slug,
        meta_description,
        keywords,
        category,
        author,
        date,
        thumbnail,
        ..
    } = fields;

    if title.is_some() {
        form.title = title;
    }
    if slug.is_some() {
        form.slug = slug;
    }
    if meta_description.is_some() {
        form.meta_description = meta_description;
    }
    if let Some(raw) = keywords {
        form.keywords = Some(parse_keywords(&raw));
    }
    if category.is_some() {
        form.category = category;
    }
    if author.is_some() {
        form.author = author;
    }
    if date.is_some() {
        form.date = date;
    }
    if thumbnail.is_some() {
        form.thumbnail = thumbnail;
    }
    Ok(())
}

fn handle_create(ctx: &mut AppContext, fields: ArticleFields, draft: bool) -> Result<()> {
    let session = session(ctx)?;
    let mut form = ctx.api.article_form(&session, None)?;
    apply_fields(&mut form, fields)?;
    form.published = Some(!draft);

    let result = ctx.api.save_article(&session, form)?;
    print_messages(&result.messages);
    if let Some(article) = result.affected_articles.first() {
        println!("  id: {}  slug: {}", article.id, article.slug);
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id_or_slug: &str,
    fields: ArticleFields,
    published: Option<bool>,
) -> Result<()> {
    let session = session(ctx)?;
    let mut form = ctx.api.article_form(&session, Some(id_or_slug))?;
    apply_fields(&mut form, fields)?;
    if published.is_some() {
        form.published = published;
    }

    let result = ctx.api.save_article(&session, form)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id_or_slug: &str, yes: bool) -> Result<()> {
    let session = session(ctx)?;
    if !yes {
        let answer = prompt(&format!(
            "Are you sure you want to delete '{}'? [y/N] ",
            id_or_slug
        ))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_article(&session, id_or_slug)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_generate(
    ctx: &mut AppContext,
    response: Option<PathBuf>,
    print_request: bool,
) -> Result<()> {
    if print_request {
        let request =
            serde_json::to_string_pretty(&draft_request()).map_err(AutopulseError::Serialization)?;
        println!("{}", request);
        return Ok(());
    }

    let session = session(ctx)?;
    let input = match response {
        Some(path) if path.as_os_str() == "-" => ResponseInput::Stdin,
        Some(path) => ResponseInput::File(path),
        None => ResponseInput::Stdin,
    };
    let mut generator = ResponseDraftSource::new(input);

    let result = ctx.api.generate_draft(&session, &mut generator)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: &Path) -> Result<()> {
    let session = session(ctx)?;
    let result = ctx.api.export_articles(&session, output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let session = session(ctx)?;
    let text = std::fs::read_to_string(path).map_err(AutopulseError::Io)?;
    let result = ctx.api.import_articles(&session, &text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sitemap(ctx: &AppContext, output: &Path) -> Result<()> {
    let session = session(ctx)?;
    let result = ctx.api.sitemap(&session, output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if let (true, Some(config)) = (show_all, &result.config) {
        for key in CONFIG_KEYS {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<&str>) {
    match command {
        Some(name) => print_help_for_command(name),
        None => print_grouped_help(),
    }
}
