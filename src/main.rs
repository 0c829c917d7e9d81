use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use futures::channel::mpsc::{self, UnboundedSender};
use tokio::io::{AsyncBufReadExt, BufReader};

use anylist::config::{ApiConfig, Config};
use anylist::listing::{
    FilterSet, FilterValue, HttpListingApi, ListingApi, ListingCoordinator, ListingResponse,
    RequestParams, Transforms,
};
use anylist::logging::init_tracing;
use anylist::pagination::{
    generate, PageChanged, PageSequence, PageSequenceElement, PaginationConfig,
    PaginationOverrides,
};
use anylist::ui::filters::{debounce, FiltersIntent, FiltersReducer, FiltersState};
use anylist::ui::mvi::Reducer;
use anylist::ui::paginator::{PaginatorIntent, PaginatorReducer, PaginatorState};

type Listing = ListingResponse<serde_json::Value>;
type Coordinator = ListingCoordinator<FilterSet, RequestParams, Listing, Listing>;

#[derive(Parser)]
#[command(name = "anylist", version, about = "Browse paginated listing endpoints")]
struct Cli {
    /// Config file (default: ~/.config/anylist/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the pagination sequence for a page.
    Pages {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Total number of items.
        #[arg(long)]
        total: Option<u64>,
        /// Fixed number of pages, instead of --total.
        #[arg(long, conflicts_with = "total")]
        pages: Option<u32>,
        #[command(flatten)]
        pagination: PaginationArgs,
    },
    /// Fetch one page from the listing endpoint.
    Fetch {
        /// Endpoint URL, overriding `api.base_url`.
        #[arg(long)]
        url: Option<String>,
        /// Filter as `name=value`; repeatable.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, FilterValue)>,
        #[arg(long)]
        page: Option<u32>,
        #[command(flatten)]
        pagination: PaginationArgs,
    },
    /// Edit filters interactively from stdin.
    Browse {
        #[arg(long)]
        url: Option<String>,
        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

#[derive(Args)]
struct PaginationArgs {
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    max_visible: Option<u32>,
    #[arg(long)]
    first_last_arrows: bool,
    #[arg(long)]
    show_disabled_arrows: bool,
    #[arg(long)]
    no_prev_next_arrows: bool,
    #[arg(long)]
    no_first_last_pages: bool,
}

impl PaginationArgs {
    fn overrides(&self) -> PaginationOverrides {
        PaginationOverrides {
            page_size: self.page_size,
            max_visible_page_numbers: self.max_visible,
            has_first_last_arrows: self.first_last_arrows.then_some(true),
            is_show_disabled_arrows: self.show_disabled_arrows.then_some(true),
            has_prev_next_arrows: self.no_prev_next_arrows.then_some(false),
            has_first_last_pages: self.no_first_last_pages.then_some(false),
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, FilterValue), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), FilterValue::parse(value.trim())))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Command::Pages {
            page,
            total,
            pages,
            pagination,
        } => {
            let config = resolve_pagination(&config, &pagination)?;
            let sequence = generate(page, total, pages, &config);
            if let Some(corrected) = sequence.page_correction {
                println!("page {} is past the end, showing page {}", page, corrected);
            }
            let current = sequence.page_correction.unwrap_or(page.max(1));
            println!("{}", render_sequence(&sequence, current));
            println!("last page: {}", sequence.last_page_number);
            Ok(())
        }
        Command::Fetch {
            url,
            filters,
            page,
            pagination,
        } => {
            let pagination = resolve_pagination(&config, &pagination)?;
            run_fetch(&config, url, filters, page, pagination).await
        }
        Command::Browse { url, pagination } => {
            let pagination = resolve_pagination(&config, &pagination)?;
            run_browse(&config, url, pagination).await
        }
    }
}

fn resolve_pagination(config: &Config, args: &PaginationArgs) -> Result<PaginationConfig> {
    let resolved = config.pagination.merge(&args.overrides()).resolve();
    if resolved.page_size == 0 {
        bail!("page size must be greater than zero");
    }
    Ok(resolved)
}

fn build_coordinator(config: &Config, url: Option<String>) -> Result<Coordinator> {
    let api_config = ApiConfig {
        base_url: url.unwrap_or_else(|| config.api.base_url.clone()),
        ..config.api.clone()
    };
    let api: Arc<dyn ListingApi<RequestParams, Listing>> =
        Arc::new(HttpListingApi::<Listing>::new(&api_config)?);
    let transforms =
        Transforms::identity().request(|filters: FilterSet| RequestParams::from(filters));
    Ok(ListingCoordinator::with_transforms(api, transforms))
}

async fn run_fetch(
    config: &Config,
    url: Option<String>,
    filters: Vec<(String, FilterValue)>,
    page: Option<u32>,
    pagination: PaginationConfig,
) -> Result<()> {
    let coordinator = build_coordinator(config, url)?;

    let mut payload = config.listing.initial_filters.clone();
    for (name, value) in filters {
        payload.set(name, value);
    }
    let page_number = page.or_else(|| payload.page_number()).unwrap_or(1);
    payload.apply_page_change(PageChanged {
        page_number,
        page_size: pagination.page_size,
    });

    let listing = coordinator.fetch_once(payload).await.context("fetching listing")?;
    print_listing(&listing, page_number, &pagination)
}

fn print_listing(listing: &Listing, page_number: u32, pagination: &PaginationConfig) -> Result<()> {
    for item in &listing.items {
        println!("{}", serde_json::to_string(item)?);
    }
    let page_number = listing.page_number.unwrap_or(page_number);
    let sequence = generate(page_number, listing.total_items_count, None, pagination);
    println!("{}", render_sequence(&sequence, page_number));
    Ok(())
}

fn render_sequence(sequence: &PageSequence, current: u32) -> String {
    sequence
        .elements
        .iter()
        .map(|element| match element {
            PageSequenceElement::Page(page) if *page == current => format!("[{}]", page),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filter form + paginator state of the interactive view.
struct BrowseSession {
    filters: FiltersState,
    paginator: PaginatorState,
    changes: UnboundedSender<FilterSet>,
}

impl BrowseSession {
    fn dispatch_filters(&mut self, intent: FiltersIntent) -> Result<()> {
        let revision = self.filters.revision;
        self.filters = FiltersReducer::reduce(std::mem::take(&mut self.filters), intent);
        if self.filters.revision != revision {
            self.changes
                .unbounded_send(self.filters.filters.clone())
                .context("listing stopped")?;
        }
        Ok(())
    }

    fn dispatch_paginator(&mut self, intent: PaginatorIntent) -> Result<()> {
        self.paginator = PaginatorReducer::reduce(std::mem::take(&mut self.paginator), intent);
        if let Some(change) = self.paginator.page_changed {
            self.paginator = PaginatorReducer::reduce(
                std::mem::take(&mut self.paginator),
                PaginatorIntent::PageChangeDelivered,
            );
            self.dispatch_filters(FiltersIntent::PageChanged(change))?;
        }
        Ok(())
    }

    fn show(&mut self, listing: Option<Listing>) -> Result<()> {
        let Some(listing) = listing else {
            println!("(no results)");
            return Ok(());
        };
        let page_number = listing
            .page_number
            .or_else(|| self.filters.filters.page_number())
            .unwrap_or(1);
        self.dispatch_paginator(PaginatorIntent::Sync {
            page_number,
            total_items_count: listing.total_items_count,
        })?;
        for item in &listing.items {
            println!("{}", serde_json::to_string(item)?);
        }
        println!(
            "{}",
            render_sequence(&self.paginator.sequence, self.paginator.page_number)
        );
        Ok(())
    }
}

enum BrowseCommand {
    Filters(FiltersIntent),
    Paginator(PaginatorIntent),
    Quit,
}

fn parse_browse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let select = |element| Some(BrowseCommand::Paginator(PaginatorIntent::Select(element)));
    match verb {
        "set" => {
            let (name, value) = parse_filter(rest).ok()?;
            Some(BrowseCommand::Filters(FiltersIntent::Set { name, value }))
        }
        "unset" if !rest.is_empty() => Some(BrowseCommand::Filters(FiltersIntent::Unset {
            name: rest.to_string(),
        })),
        "page" => select(PageSequenceElement::Page(rest.parse().ok()?)),
        "next" => select(PageSequenceElement::NextArrow),
        "prev" => select(PageSequenceElement::PrevArrow),
        "first" => select(PageSequenceElement::FirstArrow),
        "last" => select(PageSequenceElement::LastArrow),
        "quit" | "exit" => Some(BrowseCommand::Quit),
        _ => None,
    }
}

async fn run_browse(config: &Config, url: Option<String>, pagination: PaginationConfig) -> Result<()> {
    let coordinator = build_coordinator(config, url)?;
    let (tx, rx) = mpsc::unbounded();
    coordinator.bind_to_change_stream(debounce(
        rx,
        Duration::from_millis(config.listing.debounce_ms),
    ));

    let mut initial = config.listing.initial_filters.clone();
    initial.apply_page_change(PageChanged {
        page_number: initial.page_number().unwrap_or(1),
        page_size: pagination.page_size,
    });
    tx.unbounded_send(initial.clone())
        .context("listing stopped")?;

    let mut session = BrowseSession {
        filters: FiltersState::new(initial),
        paginator: PaginatorState::new(pagination),
        changes: tx,
    };

    let mut listing_rx = coordinator.listing();
    let mut loading_rx = coordinator.is_loading();
    let mut errors_rx = coordinator.error_message();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("commands: set <name>=<value> | unset <name> | page <n> | next | prev | first | last | quit");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_browse_command(&line) {
                    Some(BrowseCommand::Filters(intent)) => session.dispatch_filters(intent)?,
                    Some(BrowseCommand::Paginator(intent)) => session.dispatch_paginator(intent)?,
                    Some(BrowseCommand::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => eprintln!("unknown command: {}", line.trim()),
                }
            }
            changed = listing_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let listing = listing_rx.borrow_and_update().clone();
                session.show(listing)?;
            }
            Ok(()) = loading_rx.changed() => {
                if *loading_rx.borrow_and_update() {
                    eprintln!("loading…");
                }
            }
            Ok(()) = errors_rx.changed() => {
                if let Some(message) = errors_rx.borrow_and_update().clone() {
                    eprintln!("error: {}", message);
                }
            }
        }
    }

    coordinator.dispose();
    Ok(())
}
