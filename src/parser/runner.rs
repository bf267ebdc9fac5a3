use crate::forms::ParseSource;
use crate::models::Build;
use crate::parser::{ComponentExtractor, VkClient, VkError};
use chrono::Utc;
use serde_json::Value;

/// Marker in a community name flagging rows for the reference catalog.
const OUR_COMPANY_MARKER: &str = "VA-PC";

pub struct ParseRunner {
    vk: VkClient,
    extractor: ComponentExtractor,
    min_price: i64,
    item_limit: i64,
}

impl ParseRunner {
    pub fn new(vk: VkClient, min_price: i64, item_limit: i64) -> Self {
        Self {
            vk,
            extractor: ComponentExtractor::new(),
            min_price,
            item_limit,
        }
    }

    /// Walk the given communities and assemble catalog rows from their
    /// listings. Items below the price floor are dropped.
    pub async fn parse_groups(
        &self,
        group_ids: &[i64],
        source: ParseSource,
    ) -> Result<Vec<Build>, VkError> {
        let mut builds = Vec::new();

        for &group_id in group_ids {
            tracing::info!("Parsing group {}", group_id);

            let company = self.vk.group_name(group_id).await;
            let items = match source {
                ParseSource::Market => self.vk.market_items(group_id, self.item_limit).await?,
                ParseSource::Wall => self.vk.wall_items(group_id, self.item_limit).await?,
            };
            tracing::info!("Found {} items in group {}", items.len(), group_id);

            for item in &items {
                if let Some(build) = self.assemble(item, group_id, &company) {
                    builds.push(build);
                }
            }
        }

        tracing::info!("Total builds parsed: {}", builds.len());
        Ok(builds)
    }

    fn assemble(&self, item: &Value, group_id: i64, company: &str) -> Option<Build> {
        let item_id = item.get("id").and_then(Value::as_i64)?;
        let title = item
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let description = item
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        // price.amount comes in kopecks, sometimes as a string
        let amount = match item.get("price").and_then(|price| price.get("amount")) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        };
        let price = amount / 100;
        if price < self.min_price {
            return None;
        }

        let full_text = format!("{}\n{}", title, description);
        let cpu = self.extractor.extract_cpu(&full_text);
        let gpu = self.extractor.extract_gpu(&full_text);
        let ram = self.extractor.extract_ram(&full_text);
        let case_color = self.extractor.extract_case_color(&description);

        let photo_url = item
            .get("thumb_photo")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                item.get("photos")
                    .and_then(Value::as_array)
                    .and_then(|photos| photos.first())
                    .and_then(|photo| photo.get("sizes"))
                    .and_then(Value::as_array)
                    .and_then(|sizes| sizes.last())
                    .and_then(|size| size.get("url"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        Some(Build {
            id: format!("{}_{}", group_id, item_id),
            company: company.to_string(),
            title,
            description,
            price,
            price_formatted: String::new(),
            cpu,
            gpu,
            ram,
            case_color,
            photo_url,
            vk_url: format!(
                "https://vk.com/market-{}?w=product-{}_{}",
                group_id, group_id, item_id
            ),
            is_our_build: company.to_uppercase().contains(OUR_COMPANY_MARKER),
            parsed_at: Utc::now(),
            price_comparison: None,
        })
    }
}
