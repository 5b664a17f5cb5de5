//! Command dispatch
//!
//! Load, filter, construct once, then render. The conversation is built after
//! the time filter so its aggregates always match the messages it holds.

use crate::cli::{Cli, Commands};
use crate::core::{Conversation, UnicodeClassifier, filter_since};
use crate::error::AppError;
use crate::output::{
    print_count_table, print_frequency_table, print_summary_table, print_timeline_tables,
    report_json,
};
use crate::source::{find_export_files, load_export};
use crate::utils::{Timezone, parse_date};

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;

    let files = find_export_files(&cli.input);
    if files.is_empty() {
        println!("No export files found under {}.", cli.input.display());
        return Ok(());
    }
    let export = load_export(&files)?;

    let messages = match cli.since.as_deref() {
        Some(raw) => {
            let cutoff = timezone.start_of_day(parse_date(raw)?);
            filter_since(export.messages, cutoff)
        }
        None => export.messages,
    };

    let conversation = Conversation::new(
        &export.participants,
        messages,
        timezone,
        &UnicodeClassifier,
    )?;

    if conversation.messages().is_empty() {
        println!("No messages found for the specified date range.");
        return Ok(());
    }

    if cli.json {
        // JSON output is always the full report document.
        let report = report_json(&conversation)?;
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
        return Ok(());
    }

    let use_color = cli.use_color();
    match &cli.command {
        Some(Commands::Summary) => print_summary_table(&conversation, use_color)?,
        Some(Commands::Messages) => print_count_table(&conversation, cli.order, use_color),
        Some(Commands::Timeline) => print_timeline_tables(&conversation, cli.order, use_color)?,
        Some(Commands::Emojis) => print_frequency_table(
            "Emojis in messages",
            conversation.emoji_counts(),
            cli.order,
            use_color,
        ),
        Some(Commands::Reactions) => print_frequency_table(
            "Reactions",
            conversation.reaction_counts(),
            cli.order,
            use_color,
        ),
        None => {
            print_summary_table(&conversation, use_color)?;
            print_count_table(&conversation, cli.order, use_color);
            print_timeline_tables(&conversation, cli.order, use_color)?;
            print_frequency_table(
                "Emojis in messages",
                conversation.emoji_counts(),
                cli.order,
                use_color,
            );
            print_frequency_table(
                "Reactions",
                conversation.reaction_counts(),
                cli.order,
                use_color,
            );
        }
    }

    Ok(())
}
