//! Standalone `comparator-cli` binary.
//!
//! Talks to a running comparator server:
//!
//! ```text
//! comparator-cli builds
//! comparator-cli show 123_777
//! comparator-cli compare 123_777 --by price
//! comparator-cli compare
//! comparator-cli search --gpu "RTX 4070" --max-price 250000
//! comparator-cli stats
//! comparator-cli parse 123 456 --source wall
//! ```
//!
//! `compare` without a build id enters an interactive mode: pick a
//! reference build with a fuzzy selector, then a comparison kind.

use clap::{Parser, Subcommand, ValueEnum};
use comparator::cli::flow::ComparisonFlow;
use comparator::cli::output;
use comparator::client::{ClientError, PcBuildsClient, DEFAULT_BASE_URL};
use comparator::forms::{ComparisonType, ParseSource, SearchQuery};
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Select};

#[derive(Parser, Debug)]
#[command(
    name = "comparator-cli",
    version,
    about = "Browse and compare PC builds from the comparator server"
)]
struct Cli {
    /// API base URL of the comparator server
    #[arg(long, env = "COMPARATOR_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the reference catalog
    Builds,
    /// Show one build
    Show {
        /// Build id, e.g. 123_777
        id: String,
    },
    /// Compare a build against the open catalog
    Compare {
        /// Build id; omit for interactive selection
        id: Option<String>,
        /// Comparison kind
        #[arg(long, value_enum, default_value_t = CompareBy::Price)]
        by: CompareBy,
    },
    /// Search the whole catalog
    Search {
        /// Substring over title or description
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        cpu: Option<String>,
        #[arg(long)]
        gpu: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
    },
    /// Show catalog statistics
    Stats,
    /// Start catalog ingestion on the server
    Parse {
        /// VK community ids
        group_ids: Vec<i64>,
        /// Listing source: market or wall
        #[arg(long, value_enum, default_value_t = SourceArg::Market)]
        source: SourceArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompareBy {
    Price,
    Specs,
}

impl From<CompareBy> for ComparisonType {
    fn from(by: CompareBy) -> Self {
        match by {
            CompareBy::Price => ComparisonType::Price,
            CompareBy::Specs => ComparisonType::Specs,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Market,
    Wall,
}

impl From<SourceArg> for ParseSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Market => ParseSource::Market,
            SourceArg::Wall => ParseSource::Wall,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = PcBuildsClient::new(&cli.api_url);

    if let Err(err) = run(&client, cli.command).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(client: &PcBuildsClient, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Builds => {
            let builds = client.our_builds().await?;
            output::print_results(&builds);
        }
        Commands::Show { id } => {
            let build = client.build(&id).await?;
            output::print_build(&build);
        }
        Commands::Compare { id: Some(id), by } => {
            let baseline = client.build(&id).await?;
            println!("Сравниваем с:");
            output::print_build(&baseline);
            println!();

            let results = match by {
                CompareBy::Price => client.compare_by_price(&id).await?,
                CompareBy::Specs => client.compare_by_specs(&id).await?,
            };
            output::print_results(&results);
        }
        Commands::Compare { id: None, .. } => {
            interactive_compare(client).await?;
        }
        Commands::Search {
            q,
            cpu,
            gpu,
            company,
            min_price,
            max_price,
        } => {
            let filters = SearchQuery {
                q,
                cpu,
                gpu,
                company,
                min_price,
                max_price,
            };
            let builds = client.search(&filters).await?;
            output::print_results(&builds);
        }
        Commands::Stats => {
            let stats = client.statistics().await?;
            output::print_stats(&stats);
        }
        Commands::Parse { group_ids, source } => {
            let response = client.start_parsing(group_ids, source.into()).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

async fn interactive_compare(client: &PcBuildsClient) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = output::spinner("Загружаем каталог...");
    let catalog = client.our_builds().await;
    spinner.finish_and_clear();

    let catalog = catalog?;
    if catalog.is_empty() {
        println!("Каталог пуст. Сначала запустите парсинг.");
        return Ok(());
    }

    let mut flow = ComparisonFlow::new();

    loop {
        let labels: Vec<String> = catalog
            .iter()
            .map(|build| format!("{} ({})", build.title, build.price_formatted))
            .collect();
        let picked = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Выберите сборку")
            .items(&labels)
            .interact()?;
        flow.select_baseline(catalog[picked].clone());

        let kind_index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Сравнить по")
            .items(&["цене", "характеристикам"])
            .default(0)
            .interact()?;
        let kind = if kind_index == 0 {
            ComparisonType::Price
        } else {
            ComparisonType::Specs
        };

        let token = flow
            .begin_comparison(kind)
            .expect("baseline was just selected");
        let baseline_id = flow.baseline().expect("baseline present").id.clone();

        let spinner = output::spinner("Сравниваем...");
        let outcome: Result<_, ClientError> = match kind {
            ComparisonType::Price => client.compare_by_price(&baseline_id).await,
            ComparisonType::Specs => client.compare_by_specs(&baseline_id).await,
        };
        spinner.finish_and_clear();

        flow.finish_comparison(token, outcome);
        output::print_results(flow.results());

        let next = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Дальше")
            .items(&["выбрать другую сборку", "выход"])
            .default(0)
            .interact()?;
        if next == 1 {
            break;
        }
        flow.deselect();
    }

    Ok(())
}
