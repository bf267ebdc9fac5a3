//! Terminal rendering helpers for build listings.

use crate::models::{Build, CatalogStats, PriceComparison};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {msg}")
            .expect("invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn print_build(build: &Build) {
    let tag = match build.price_comparison {
        Some(PriceComparison::Cheaper) => " [дешевле]",
        Some(PriceComparison::MoreExpensive) => " [дороже]",
        Some(PriceComparison::Equal) => " [та же цена]",
        None => "",
    };

    println!("{} - {}{}", build.title, build.price_formatted, tag);
    println!("  {} | {}", build.id, build.company);
    if !build.cpu.is_empty() || !build.gpu.is_empty() || !build.ram.is_empty() {
        let ram = if build.ram.is_empty() {
            String::new()
        } else {
            format!("{} GB", build.ram)
        };
        println!(
            "  CPU: {}  GPU: {}  RAM: {}",
            or_dash(&build.cpu),
            or_dash(&build.gpu),
            or_dash(&ram)
        );
    }
    println!("  {}", build.vk_url);
}

pub fn print_results(builds: &[Build]) {
    if builds.is_empty() {
        println!("Ничего не найдено.");
        return;
    }
    for build in builds {
        print_build(build);
        println!();
    }
    println!("Всего: {}", builds.len());
}

pub fn print_stats(stats: &CatalogStats) {
    println!("Всего сборок:     {}", stats.total_builds);
    println!("Наших сборок:     {}", stats.our_builds);
    println!("Остальных сборок: {}", stats.other_builds);
    match &stats.last_update {
        Some(ts) => println!("Обновлено:        {}", ts.to_rfc3339()),
        None => println!("Обновлено:        никогда"),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
