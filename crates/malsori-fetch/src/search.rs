use crate::api::SearchItem;
use crate::client::{asset_url, SearchClient};
use anyhow::{Context, Result};
use malsori_model::{batch, RunContext};
use std::path::Path;
use std::time::Duration;

/// Pause between audio downloads. A politeness contract with the remote
/// service, not a tunable.
const DOWNLOAD_DELAY: Duration = Duration::from_millis(300);

/// Outcome of a complete fetch run: main pass plus the retry sweep.
#[derive(Debug)]
pub struct RunSummary {
    pub words: usize,
    pub downloads: u32,
    /// Words with zero downloads after both passes, in list order.
    pub unfound: Vec<String>,
}

/// Run the full fetch: the batched main pass over every target word, then a
/// single retry sweep of individual searches for words that produced no
/// downloads. Errors from any search or download abort the run; files
/// already written stay on disk.
pub async fn run(
    client: &SearchClient,
    ctx: &mut RunContext,
    output_dir: &Path,
) -> Result<RunSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;

    let words = ctx.targets().words().to_vec();
    let groups: Vec<&[String]> = batch::batches(&words).collect();
    let total = groups.len();
    for (i, group) in groups.iter().enumerate() {
        tracing::info!(group = i + 1, of = total, "Searching");
        search_words(client, ctx, group, output_dir).await?;
    }

    let unfound = ctx.unfound();
    if !unfound.is_empty() {
        tracing::warn!(
            words = %unfound.join(","),
            "Not found in the main pass; rerunning individual searches"
        );
        retry_pass(client, ctx, &unfound, output_dir).await?;
    }

    let unfound = ctx.unfound();
    if !unfound.is_empty() {
        tracing::warn!("{} could not be found.", unfound.join(","));
    }

    Ok(RunSummary {
        words: words.len(),
        downloads: ctx.downloads(),
        unfound,
    })
}

/// Search one batch of words and download every new matching audio asset.
///
/// The first page determines the page count; pages 2..=N follow. Batch
/// words are joined with spaces into a single query, so a one-word batch
/// is a plain single-word search.
async fn search_words(
    client: &SearchClient,
    ctx: &mut RunContext,
    words: &[String],
    output_dir: &Path,
) -> Result<()> {
    let query = words.join(" ");

    let first = client.search_page(&query, 1).await?;
    let total_pages = first.pager_info.total_pages;
    tracing::debug!(query = %query, pages = total_pages, "First results page");
    download_matches(client, ctx, first.items(), output_dir).await?;

    for page in 2..=total_pages {
        let response = client.search_page(&query, page).await?;
        download_matches(client, ctx, response.items(), output_dir).await?;
    }

    Ok(())
}

/// One retry per unfound word, in list order. Runs at most once per fetch.
async fn retry_pass(
    client: &SearchClient,
    ctx: &mut RunContext,
    unfound: &[String],
    output_dir: &Path,
) -> Result<()> {
    let total = unfound.len();
    for (i, word) in unfound.iter().enumerate() {
        tracing::info!(retry = i + 1, of = total, word = %word, "Searching individually");
        search_words(client, ctx, std::slice::from_ref(word), output_dir).await?;
    }
    Ok(())
}

/// A download the pass has committed to for one search hit.
#[derive(Debug, PartialEq, Eq)]
pub struct PlannedDownload {
    pub word: String,
    pub url: String,
    pub file_name: String,
}

/// Decide whether one search hit warrants a download.
///
/// A hit qualifies when its headword is a target word, it carries a
/// non-empty audio path, and that path has not been fetched this run.
/// Qualifying hits advance the word's counter and mark the asset seen, so
/// an asset repeated across pages or items is downloaded exactly once.
pub fn plan_item(ctx: &mut RunContext, item: &SearchItem) -> Option<PlannedDownload> {
    if !ctx.is_target(&item.handle_entry) {
        return None;
    }
    let path = item.audio_path()?;
    if ctx.asset_seen(path) {
        return None;
    }
    let sequence = ctx.record_download(&item.handle_entry, path)?;
    Some(PlannedDownload {
        word: item.handle_entry.clone(),
        url: asset_url(path),
        file_name: format!("{}{}.mp3", item.handle_entry, sequence),
    })
}

async fn download_matches(
    client: &SearchClient,
    ctx: &mut RunContext,
    items: &[SearchItem],
    output_dir: &Path,
) -> Result<()> {
    for item in items {
        let Some(plan) = plan_item(ctx, item) else {
            continue;
        };
        let bytes = client
            .fetch_audio(&plan.url)
            .await
            .with_context(|| format!("Failed to download audio for '{}'", plan.word))?;
        let path = output_dir.join(&plan.file_name);
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(
            word = %plan.word,
            path = %path.display(),
            bytes = bytes.len(),
            "Downloaded pronunciation"
        );
        tokio::time::sleep(DOWNLOAD_DELAY).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PhoneticSymbol;
    use malsori_model::TargetList;

    fn context(words: &[&str]) -> RunContext {
        RunContext::new(TargetList::from_words(
            words.iter().map(|w| (*w).to_string()).collect(),
        ))
    }

    fn item(word: &str, path: Option<&str>) -> SearchItem {
        SearchItem {
            handle_entry: word.to_string(),
            search_phonetic_symbol_list: path
                .map(|p| {
                    vec![PhoneticSymbol {
                        phonetic_symbol_path: Some(p.to_string()),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_plan_skips_non_target_headwords() {
        let mut ctx = context(&["사과"]);
        assert_eq!(plan_item(&mut ctx, &item("사과나무", Some("/a/1.mp3"))), None);
    }

    #[test]
    fn test_plan_skips_items_without_audio() {
        let mut ctx = context(&["사과"]);
        assert_eq!(plan_item(&mut ctx, &item("사과", None)), None);
        assert_eq!(ctx.count_for("사과"), 0);
    }

    #[test]
    fn test_repeated_asset_is_planned_once() {
        let mut ctx = context(&["사과"]);
        let hit = item("사과", Some("/a/1.mp3"));
        assert!(plan_item(&mut ctx, &hit).is_some());
        assert_eq!(plan_item(&mut ctx, &hit), None);
        assert_eq!(ctx.count_for("사과"), 1);
    }

    #[test]
    fn test_distinct_assets_get_sequence_numbers() {
        let mut ctx = context(&["사과"]);
        let first = plan_item(&mut ctx, &item("사과", Some("//a/1.mp3"))).unwrap();
        let second = plan_item(&mut ctx, &item("사과", Some("//a/2.mp3"))).unwrap();
        assert_eq!(first.file_name, "사과1.mp3");
        assert_eq!(second.file_name, "사과2.mp3");
        assert_eq!(first.url, "https://a/1.mp3");
        assert_eq!(ctx.count_for("사과"), 2);
    }
}
