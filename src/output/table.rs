use chrono::Duration;
use comfy_table::{Cell, Color};
use std::collections::BTreeMap;

use crate::cli::SortOrder;
use crate::core::{Conversation, FrequencyTable, Identity};
use crate::error::AppError;
use crate::output::format::{
    create_styled_table, format_average, format_count, header_cell, right_cell,
};

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn ordered<'a, T>(map: &'a BTreeMap<Identity, T>, order: SortOrder) -> Vec<(&'a Identity, &'a T)> {
    let mut rows: Vec<_> = map.iter().collect();
    if matches!(order, SortOrder::Desc) {
        rows.reverse();
    }
    rows
}

pub(crate) fn print_summary_table(
    conversation: &Conversation,
    use_color: bool,
) -> Result<(), AppError> {
    let (start, end) = conversation.time_span()?;
    let names: Vec<_> = conversation
        .participants()
        .iter()
        .map(|p| p.full_name.as_str())
        .collect();

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Statistic", use_color),
        header_cell("Value", use_color),
    ]);
    table.add_row(vec!["Participants".to_string(), names.join(", ")]);
    table.add_row(vec![
        "Messages".to_string(),
        format_count(conversation.total_messages()),
    ]);
    table.add_row(vec![
        "Words".to_string(),
        format_count(conversation.total_words()),
    ]);
    table.add_row(vec![
        "First message".to_string(),
        start.format("%Y-%m-%d %H:%M").to_string(),
    ]);
    table.add_row(vec![
        "Last message".to_string(),
        end.format("%Y-%m-%d %H:%M").to_string(),
    ]);
    table.add_row(vec![
        "Days".to_string(),
        format_count(conversation.num_days()? as u64),
    ]);
    table.add_row(vec![
        "Avg words per message".to_string(),
        format_average(conversation.average_message_length()?),
    ]);
    table.add_row(vec![
        "Avg messages per day".to_string(),
        format_average(conversation.average_messages_per_day()?),
    ]);

    println!("{table}");
    Ok(())
}

pub(crate) fn print_count_table(conversation: &Conversation, order: SortOrder, use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Participant", use_color),
        header_cell("Messages", use_color),
        header_cell("Words", use_color),
    ]);

    for (participant, messages) in ordered(conversation.message_counts(), order) {
        let words = conversation
            .word_counts()
            .get(participant)
            .copied()
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(&participant.full_name),
            right_cell(&format_count(*messages), None, false),
            right_cell(&format_count(words), None, false),
        ]);
    }

    let total_color = if use_color {
        Some(Color::Yellow)
    } else {
        None
    };
    let mut total_label = Cell::new("Total").add_attribute(comfy_table::Attribute::Bold);
    if let Some(c) = total_color {
        total_label = total_label.fg(c);
    }
    table.add_row(vec![
        total_label,
        right_cell(&format_count(conversation.total_messages()), total_color, true),
        right_cell(&format_count(conversation.total_words()), total_color, true),
    ]);

    println!("{table}");
}

fn print_histogram_table<I, L>(
    title: &str,
    columns: &[(&Identity, &[u64])],
    labels: I,
    use_color: bool,
) where
    I: IntoIterator<Item = (usize, L)>,
    L: Into<String>,
{
    println!("\n  {title}");

    let mut table = create_styled_table();
    let mut header = vec![header_cell("", use_color)];
    for (participant, _) in columns {
        header.push(header_cell(&participant.full_name, use_color));
    }
    header.push(header_cell("Total", use_color));
    table.set_header(header);

    for (bucket, label) in labels {
        let label: String = label.into();
        let mut row = vec![Cell::new(label)];
        let mut total = 0;
        for (_, buckets) in columns {
            let count = buckets.get(bucket).copied().unwrap_or(0);
            total += count;
            row.push(right_cell(&format_count(count), None, false));
        }
        row.push(right_cell(
            &format_count(total),
            if use_color { Some(Color::Yellow) } else { None },
            false,
        ));
        table.add_row(row);
    }

    println!("{table}");
}

pub(crate) fn print_timeline_tables(
    conversation: &Conversation,
    order: SortOrder,
    use_color: bool,
) -> Result<(), AppError> {
    let timeline = conversation.timeline()?;
    let (start, _) = conversation.time_span()?;
    let num_days = conversation.num_days()?;

    let hours: Vec<(&Identity, &[u64])> = ordered(&timeline.hours, order)
        .into_iter()
        .map(|(p, buckets)| (p, buckets.as_slice()))
        .collect();
    print_histogram_table(
        "Messages by hour of day",
        &hours,
        (0..24usize).map(|h| (h, format!("{h:02}:00"))),
        use_color,
    );

    let weekdays: Vec<(&Identity, &[u64])> = ordered(&timeline.weekdays, order)
        .into_iter()
        .map(|(p, buckets)| (p, buckets.as_slice()))
        .collect();
    print_histogram_table(
        "Messages by weekday",
        &weekdays,
        WEEKDAY_NAMES.iter().enumerate().map(|(i, name)| (i, *name)),
        use_color,
    );

    let days: Vec<(&Identity, &[u64])> = ordered(&timeline.days, order)
        .into_iter()
        .map(|(p, buckets)| (p, buckets.as_slice()))
        .collect();
    print_histogram_table(
        "Messages by day",
        &days,
        (0..num_days as usize).map(|offset| {
            let date = (start + Duration::days(offset as i64)).format("%Y-%m-%d");
            (offset, date.to_string())
        }),
        use_color,
    );

    Ok(())
}

pub(crate) fn print_frequency_table(
    title: &str,
    counts: &FrequencyTable,
    order: SortOrder,
    use_color: bool,
) {
    println!("\n  {title}");

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Participant", use_color),
        header_cell("Glyph", use_color),
        header_cell("Count", use_color),
    ]);

    for (participant, tags) in ordered(counts, order) {
        // Highest counts first within a participant, ties by tag.
        let mut rows: Vec<_> = tags.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (tag, count) in rows {
            table.add_row(vec![
                Cell::new(&participant.full_name),
                Cell::new(tag),
                right_cell(&format_count(*count), None, false),
            ]);
        }
    }

    println!("{table}");
}
