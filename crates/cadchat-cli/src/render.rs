//! Terminal rendering of studio updates.

use cadchat_application::history::{ReplyEntry, summary_label};
use cadchat_application::{StudioUpdate, StudioUseCase, WELCOME_EXAMPLES};
use cadchat_core::dispatch::{Annotations, Presentation};
use cadchat_core::history::ConversationSummary;
use cadchat_core::result::ExportFormat;
use cadchat_core::scene::SceneOutcome;
use cadchat_core::session::{SessionSnapshot, Transition};
use cadchat_infrastructure::HeadlessEngine;
use colored::Colorize;

/// Lines of generated code shown before truncating.
const CODE_PREVIEW_LINES: usize = 30;

pub async fn print_update(studio: &StudioUseCase<HeadlessEngine>, update: &StudioUpdate) {
    match &update.transition {
        Transition::Accepted { result_id, mode, .. } => {
            let badge = update.snapshot.conversation_badge().unwrap_or_default();
            println!(
                "{}",
                format!("Result {} ({}) in conversation {}", result_id, mode, badge).bright_green()
            );
        }
        Transition::Failed { message } => {
            println!("{}", format!("Error: {}", message).red());
            return;
        }
        Transition::Stale { ticket } => {
            println!(
                "{}",
                format!("Response {} was superseded and ignored", ticket).bright_black()
            );
            return;
        }
        Transition::Reset => println!("{}", "Started a new conversation".bright_green()),
        Transition::Started { .. } => {}
    }

    print_presentation(&update.presentation);

    match &update.scene {
        Some(SceneOutcome::Rendered { .. }) => {
            let summary = studio
                .inspect_scene(|scene| scene.engine().scene().map(|s| s.to_string()))
                .await;
            if let Some(summary) = summary {
                println!("{}", format!("Scene: {}", summary).bright_blue());
            }
        }
        Some(SceneOutcome::Failed(err)) => {
            println!("{}", format!("Scene could not be built: {}", err).yellow());
        }
        _ => {}
    }

    if update.snapshot.result_id.is_some() {
        print_download_options(studio.download_options().await);
    }
}

pub fn print_presentation(presentation: &Presentation) {
    match presentation {
        Presentation::Welcome => print_welcome(),
        Presentation::Scene { annotations, .. } => print_annotations(annotations),
        Presentation::Vector { svg, annotations } => {
            println!(
                "{}",
                format!("2D drawing ({} bytes of SVG), save it with /download svg", svg.len())
                    .bright_blue()
            );
            print_annotations(annotations);
        }
        Presentation::CodeListing {
            code,
            note,
            annotations,
        } => {
            println!("{}", note.yellow());
            let lines: Vec<&str> = code.lines().collect();
            for line in lines.iter().take(CODE_PREVIEW_LINES) {
                println!("  {}", line.bright_black());
            }
            if lines.len() > CODE_PREVIEW_LINES {
                println!(
                    "  {}",
                    format!("... {} more lines", lines.len() - CODE_PREVIEW_LINES).bright_black()
                );
            }
            print_annotations(annotations);
        }
        Presentation::Loading { annotations } => {
            println!("{}", "Waiting for the drawing...".yellow());
            print_annotations(annotations);
        }
    }
}

fn print_annotations(annotations: &Annotations) {
    if let Some(generator) = &annotations.generator {
        println!("{}", format!("Generated by {}", generator).bright_black());
    }
    if let Some(note) = &annotations.note {
        println!("{}", format!("Note: {}", note).bright_black());
    }
}

pub fn print_welcome() {
    println!("{}", "Describe a part to get started, for example:".bright_black());
    print_examples();
}

pub fn print_examples() {
    for (number, example) in WELCOME_EXAMPLES.iter().enumerate() {
        println!("  {} {}", format!("{}.", number + 1).bright_cyan(), example);
    }
}

pub fn print_download_options(formats: &[ExportFormat]) {
    let labels: Vec<&str> = formats.iter().map(|f| f.extension()).collect();
    println!(
        "{}",
        format!("Downloads: {}", labels.join(", ")).bright_black()
    );
}

pub fn print_summaries(summaries: &[ConversationSummary]) {
    if summaries.is_empty() {
        println!("{}", "No conversations yet".bright_black());
        return;
    }
    for (number, summary) in summaries.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", number + 1).bright_cyan(),
            summary_label(summary),
            summary.id.bright_black()
        );
    }
}

pub fn print_replies(replies: &[ReplyEntry]) {
    if replies.is_empty() {
        println!("{}", "No replies with a result".bright_black());
        return;
    }
    for (number, reply) in replies.iter().enumerate() {
        let marker = if reply.has_error() {
            " (error)".red().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {} {}{}",
            format!("{}.", number + 1).bright_cyan(),
            reply.label,
            reply.timestamp.bright_black(),
            marker
        );
    }
}

pub fn print_prompt_hint(snapshot: &SessionSnapshot) {
    println!("{}", snapshot.query_placeholder().bright_black());
}
