use anyhow::Context;
use clap::Parser;
use soundsite::app::{
    DiscoverQuery, album_page, discover, search_page, suggestions, track_page, uzt_page,
};
use soundsite::cli::{Cli, Commands};
use soundsite::config::Config;
use soundsite::render;
use soundsite::router::{Page, Router};
use soundsite::search::DebouncedSearch;
use soundsite::state::SiteState;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    soundsite::tracing::init(cli.verbose);

    let config = Config::from_cli(&cli);
    let state = Arc::new(SiteState::new());

    if !matches!(cli.command, Commands::Route { .. }) {
        state.initialize(&config.loader()).await;
    }

    let output = run(cli.command, &state, &config).await?;
    print!("{}", output);
    Ok(())
}

/// Router positioned at `page` with the given query parameters.
fn router_for(config: &Config, page: &Page, params: &[(&str, &str)]) -> anyhow::Result<Router> {
    let url = config
        .origin
        .join(&page.href(params))
        .with_context(|| format!("Failed to build URL for page '{}'", page))?;
    Ok(Router::new(url))
}

async fn run(command: Commands, state: &Arc<SiteState>, config: &Config) -> anyhow::Result<String> {
    let output = match command {
        Commands::Search { query, limit } => {
            let router = router_for(config, &Page::Search, &[("q", query.as_str())])?;
            let limit = limit.unwrap_or(config.search_limit);
            render::render_search_page(&search_page(state, &router, limit))?
        }
        Commands::Suggest { query, .. } if query.trim().is_empty() => {
            render::render_suggestions(None)?
        }
        Commands::Suggest { query, delay_ms } => {
            let delay = delay_ms.map_or(config.debounce, Duration::from_millis);
            let search = DebouncedSearch::new(Arc::clone(state), delay);
            let (typed, results) = search
                .replay_typing(&query, delay / 4)
                .await
                .context("Debounced search never completed")?;
            tracing::debug!("Dropdown built for {:?}", typed);
            render::render_suggestions(suggestions(&results, &typed).as_ref())?
        }
        Commands::Discover { sort, filter, page } => {
            let page = page.map(|p| p.to_string());
            let params: Vec<(&str, &str)> = [
                ("sort", sort.as_deref()),
                ("filter", filter.as_deref()),
                ("page", page.as_deref()),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
            let router = router_for(config, &Page::Discover, &params)?;
            let view = discover(state, DiscoverQuery::from_router(&router), config.page_size);
            render::render_discover(&view)?
        }
        Commands::Track { id } => {
            let router = router_for(config, &Page::Track, &[("id", id.as_str())])?;
            render::render_track_page(&track_page(state, router.param("id").as_deref()))?
        }
        Commands::Album { id } => {
            let router = router_for(config, &Page::Album, &[("id", id.as_str())])?;
            render::render_album_page(&album_page(state, router.param("id").as_deref()))?
        }
        Commands::Uzt => render::render_uzt(&uzt_page(state))?,
        Commands::Route { url } => {
            let url = config
                .origin
                .join(&url)
                .with_context(|| format!("Invalid URL '{}'", url))?;
            render::render_route(&Router::new(url))?
        }
    };
    Ok(output)
}
