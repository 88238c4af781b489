use crate::api::validate_url;
use crate::app::{AppContext, Result};
use crate::domain::{processing_steps, Item, ItemStatus};
use crate::flow::{self, NavDecision};
use crate::poll::spawn_status_watch;

pub async fn save(ctx: &AppContext, url: &str, wait: bool) -> Result<()> {
    let url = validate_url(url)?;

    let created = ctx.api.create_item(&url).await?;
    ctx.session
        .set(created.id.clone(), Some(url.clone()), Some(created.status));
    println!("Saved: {}", url);
    println!("Item id: {}", created.id);

    if !wait {
        println!(
            "Analyzing in the background. Check with: readstash status {}",
            created.id
        );
        return Ok(());
    }

    println!("Analyzing article... this usually takes a few seconds");

    let mut watch = spawn_status_watch(
        ctx.api.clone(),
        created.id.clone(),
        ctx.session.clone(),
        ctx.poll,
    );

    let mut last_status: Option<ItemStatus> = None;
    while let Some(snapshot) = watch.recv().await {
        let item = match snapshot.outcome {
            Ok(item) => item,
            Err(err) => {
                // Surfaced but not fatal; the watch retries on its own.
                eprintln!("  status check failed ({}), retrying...", err);
                continue;
            }
        };

        if last_status != Some(item.status) {
            println!("  status: {}", item.status);
            last_status = Some(item.status);
        }

        match flow::decide(item.status, ctx.poll.ready_delay) {
            NavDecision::Stay => {}
            NavDecision::Preview { after } => {
                print_checklist(true);
                tokio::time::sleep(after).await;
                println!();
                print_preview(&item);
                return Ok(());
            }
            NavDecision::Halt => {
                println!("We couldn't process this article. Please try another link.");
                return Ok(());
            }
        }
    }

    Ok(())
}

pub async fn status(ctx: &AppContext, id: Option<&str>) -> Result<()> {
    let id = flow::resolve_item_id(id, &ctx.session)?;
    let item = ctx.api.get_item(&id).await?;

    println!("{}: {}", item.id, item.status);
    match item.status {
        ItemStatus::Created | ItemStatus::Processing => print_checklist(false),
        ItemStatus::Ready | ItemStatus::Read => {
            println!("Ready to read: readstash show {}", item.id)
        }
        ItemStatus::Failed => {
            println!("We couldn't process this article. Please try another link.")
        }
    }

    Ok(())
}

pub async fn show(ctx: &AppContext, id: Option<&str>) -> Result<()> {
    let id = flow::resolve_item_id(id, &ctx.session)?;
    let item = ctx.api.get_item(&id).await?;

    match item.status {
        ItemStatus::Created | ItemStatus::Processing => {
            println!("Still analyzing. Check again with: readstash status {}", id);
        }
        ItemStatus::Failed => {
            println!("We couldn't process this article. Please try another link.");
        }
        ItemStatus::Ready | ItemStatus::Read => print_preview(&item),
    }

    Ok(())
}

pub async fn today(ctx: &AppContext) -> Result<()> {
    let items = ctx.api.list_items(Some(ItemStatus::Ready)).await?;

    // Today's reads are capped at three unfinished items; the point is a
    // short list, not an archive.
    let picks: Vec<&Item> = items.iter().filter(|item| !item.is_done()).take(3).collect();

    if picks.is_empty() {
        println!("Nothing queued for today. Save something worth reading!");
        return Ok(());
    }

    for item in picks {
        print_list_line(item);
    }

    Ok(())
}

pub async fn library(ctx: &AppContext) -> Result<()> {
    let items = ctx.api.list_items(None).await?;

    if items.is_empty() {
        println!("No saved items");
        return Ok(());
    }

    for item in &items {
        print_list_line(item);
    }

    Ok(())
}

fn print_checklist(complete: bool) {
    for step in processing_steps(complete) {
        println!("  {} {}", step.marker(), step.label);
    }
}

fn print_list_line(item: &Item) {
    let marker = if item.is_done() { " " } else { "●" };
    let time = item
        .reading_time()
        .map(|mins| format!("{} min", mins))
        .unwrap_or_else(|| "     ".to_string());
    let date = item.saved_at.format("%Y-%m-%d");

    println!(
        "{} {} {:>7}  {}  [{}]",
        marker,
        date,
        time,
        item.display_title(),
        item.id
    );
}

fn print_preview(item: &Item) {
    println!("{}", item.display_title());
    if let Some(source) = &item.source {
        println!("Source: {}", source);
    }
    if let Some(mins) = item.reading_time() {
        match item.skim_time() {
            Some(skim) => println!("{} min read · {} min skim", mins, skim),
            None => println!("{} min read", mins),
        }
    }
    if let Some(difficulty) = item.difficulty {
        println!("Difficulty: {}", difficulty.as_str());
    }
    println!("Saved: {}", item.saved_at.format("%Y-%m-%d %H:%M"));

    if let Some(points) = item.summary.as_deref().filter(|s| !s.is_empty()) {
        println!();
        println!("TL;DR:");
        for point in points {
            println!("  - {}", point);
        }
    }

    println!();
    println!("Read it: readstash tui  (or open {})", item.url);
}
