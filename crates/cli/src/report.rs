//! Plain-text rendering of the analysis results. Chart output is handled
//! by external tooling; this module only prints the data.

use chatter_analysis::{CumulativeSeries, FrequencyTable, SentimentDistribution, UserSummary};
use chatter_domain::Item;
use chatter_ingest::IngestSummary;
use chatter_text::StopwordFilter;

const SHORT_PRINT_LIMIT: usize = 5;

pub fn print_ingest_summary(summary: &IngestSummary, count: u64, capacity: u64) {
    println!(
        "Ingest finished ({:?}): {} accepted, {} rejected, collection at {}/{}",
        summary.reason, summary.accepted, summary.rejected, count, capacity
    );
}

pub fn print_items(items: &[Item], short: bool) {
    let limit = if short {
        items.len().min(SHORT_PRINT_LIMIT)
    } else {
        items.len()
    };

    for item in &items[..limit] {
        println!("Item id: {}", item.id);
        println!("  user: {}", item.user_id);
        println!("  text: {}", item.raw_text);
        if let Some(transformed) = &item.transformed_text {
            println!("  transformed: {transformed}");
        }
        if let Some(sentiment) = &item.sentiment {
            println!(
                "  sentiment: {} (neg {:.3}, neutral {:.3}, pos {:.3})",
                sentiment.label, sentiment.negative, sentiment.neutral, sentiment.positive
            );
        }
    }
    println!("Printed {} out of {} items.", limit, items.len());
}

pub fn print_frequents(table: &FrequencyTable, n: usize, stopwords: &StopwordFilter) {
    println!("Top {n} words including stopwords:");
    for (rank, (word, count)) in table.top_n(n, None).iter().enumerate() {
        println!("{:2}. {:<18} {:>4}", rank + 1, word, count);
    }

    println!();
    println!("Top {n} words without stopwords:");
    for (rank, (word, count)) in table.top_n(n, Some(stopwords)).iter().enumerate() {
        println!("{:2}. {:<18} {:>4}", rank + 1, word, count);
    }
}

pub fn print_distribution(distribution: &SentimentDistribution) {
    println!();
    println!("Sentiment probability mass:");
    println!("  negative {:.3}", distribution.negative);
    println!("  neutral  {:.3}", distribution.neutral);
    println!("  positive {:.3}", distribution.positive);
}

pub fn print_user_summaries(summaries: &[UserSummary]) {
    println!("Average sentiment per user ({} users):", summaries.len());
    for summary in summaries {
        println!(
            "  user {:>12}: pos {:.3}, neg {:.3}, neutral {:.3}",
            summary.user_id, summary.avg_positive, summary.avg_negative, summary.avg_neutral
        );
    }
}

pub fn print_series(series: &CumulativeSeries) {
    println!();
    println!(
        "Cumulative follower/friend ratio ({} users with a defined ratio):",
        series.len()
    );
    for (index, value) in series.values().iter().enumerate() {
        println!("{:4}  {:.4}", index + 1, value);
    }
}
