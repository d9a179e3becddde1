use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use meal_catalog::Catalog;
use meal_catalog::HttpCatalog;
use meal_catalog::MealRecord;
use meal_engine::Direction;
use meal_engine::MealEngine;
use meal_engine::QueryIntent;
use meal_engine::ResultSet;
use meal_engine::SortSpec;
use tokio::io::BufReader;

use crate::cli::BrowseCommand;
use crate::cli::CategoriesCommand;
use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::LetterCommand;
use crate::cli::OutputFormat;
use crate::cli::SearchCommand;
use crate::cli::ShowCommand;
use crate::cli::WatchCommand;
use crate::config;
use crate::render;
use crate::watch::WatchOptions;
use crate::watch::watch_lines;

pub async fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref(), &cli.overrides())?;
    let engine = MealEngine::connect(config).context("failed to set up the catalog client")?;

    match cli.command {
        Command::Search(cmd) => run_search(&engine, cmd).await,
        Command::Browse(cmd) => run_browse(&engine, cmd).await,
        Command::Show(cmd) => run_show(&engine, cmd).await,
        Command::Letter(cmd) => run_letter(&engine, cmd).await,
        Command::Categories(cmd) => run_categories(&engine, cmd).await,
        Command::Areas => {
            print!("{}", render::name_list(&engine.catalog().list_areas().await));
            Ok(())
        }
        Command::Ingredients => {
            print!("{}", render::name_list(&engine.catalog().list_ingredients().await));
            Ok(())
        }
        Command::Watch(cmd) => run_watch(&engine, cmd).await,
    }
}

async fn run_search(engine: &MealEngine<HttpCatalog>, cmd: SearchCommand) -> Result<()> {
    let intent = QueryIntent::text(cmd.query());
    let results = engine.resolve(&intent).await;
    print_results(engine, &results, cmd.sort.spec(), cmd.output_format)
}

async fn run_browse(engine: &MealEngine<HttpCatalog>, cmd: BrowseCommand) -> Result<()> {
    if cmd.categories.len() > 1 {
        eprintln!(
            "note: only the first category ({}) is sent upstream; areas are matched locally",
            cmd.categories[0]
        );
    }
    let intent = QueryIntent::facets(cmd.categories, cmd.areas);
    let results = engine.resolve(&intent).await;
    print_results(engine, &results, cmd.sort.spec(), cmd.output_format)
}

async fn run_letter(engine: &MealEngine<HttpCatalog>, cmd: LetterCommand) -> Result<()> {
    let meals = engine.catalog().search_by_first_letter(cmd.letter).await;
    let results = ResultSet::from_records(meals);
    print_results(engine, &results, cmd.sort.spec(), cmd.output_format)
}

async fn run_show(engine: &MealEngine<HttpCatalog>, cmd: ShowCommand) -> Result<()> {
    let Some((record, mut cohort)) = engine.navigator().open(&cmd.id).await else {
        bail!("no meal with id {}", cmd.id);
    };

    let (direction, steps) = match (cmd.next, cmd.prev) {
        (Some(n), _) => (Direction::Next, n),
        (None, Some(n)) => (Direction::Previous, n),
        (None, None) => (Direction::Next, 0),
    };

    let shown: MealRecord = if steps == 0 {
        record
    } else if cohort.can_step() {
        for _ in 0..steps {
            cohort.advance(direction);
        }
        engine
            .navigator()
            .hydrate_current(&cohort)
            .await
            .unwrap_or(record)
    } else {
        eprintln!("note: {} has no siblings to step through", record.name);
        record
    };

    match cmd.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        OutputFormat::Text => {
            let label = cohort.position_label();
            print!("{}", render::meal_detail(&shown, label.as_deref()));
        }
    }
    Ok(())
}

async fn run_categories(engine: &MealEngine<HttpCatalog>, cmd: CategoriesCommand) -> Result<()> {
    let categories = engine.catalog().list_category_details().await;
    print!("{}", render::category_list(&categories, cmd.describe));
    Ok(())
}

async fn run_watch(engine: &MealEngine<HttpCatalog>, cmd: WatchCommand) -> Result<()> {
    let options = WatchOptions {
        sort: cmd.sort.spec(),
        initial: !cmd.no_initial,
    };
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    watch_lines(engine, stdin, &mut stdout, options).await
}

fn print_results(
    engine: &MealEngine<HttpCatalog>,
    results: &ResultSet,
    sort: SortSpec,
    format: OutputFormat,
) -> Result<()> {
    let sorted = engine.apply(results, sort);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sorted)?),
        OutputFormat::Text => print!("{}", render::meal_table(&sorted)),
    }
    Ok(())
}
