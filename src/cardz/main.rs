use cardz::api::{CardzApi, CmdMessage, ConfigAction, LocationEdit, MessageLevel};
use cardz::commands::CardUpdate;
use cardz::error::{CardzError, Result};
use cardz::geo::Coordinates;
use cardz::geocode::suburb;
use cardz::model::{format_card_number, Card, CardDraft, CardLocation, SortBy, Theme};
use cardz::query::{CardQuery, CategoryFilter};
use cardz::scan::ScanCapture;
use cardz::store::FsBackend;
use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let backend = FsBackend::new(data_dir(&cli)?);
    let (mut api, report) = CardzApi::new(backend);

    for warning in &report.warnings {
        eprintln!("{}", format!("Warning: {}", warning).yellow());
    }

    match cli.command {
        Some(Commands::Add {
            name,
            number,
            format,
            category,
            color,
            notes,
            location,
            location_name,
            favorite,
        }) => {
            let draft = CardDraft {
                id: None,
                name,
                card_number: number,
                barcode_format: parse_format(&format)?,
                category,
                color,
                notes: notes.unwrap_or_default(),
                location: parse_card_location(location.as_deref(), location_name)?,
                favorite,
            };
            let result = api.add_card(draft)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::List {
            search,
            category,
            near,
        }) => handle_list(&mut api, search, category, near),
        Some(Commands::Show { index }) => {
            let result = api.show_card(index)?;
            if let Some(card) = result.listed_cards.first() {
                print_card_detail(card);
            }
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Edit {
            index,
            name,
            number,
            format,
            category,
            color,
            notes,
            location,
            location_name,
            clear_location,
        }) => {
            let location_edit = if clear_location {
                LocationEdit::Clear
            } else {
                match parse_card_location(location.as_deref(), location_name)? {
                    Some(loc) => LocationEdit::Set(loc),
                    None => LocationEdit::Keep,
                }
            };
            let update = CardUpdate {
                name,
                card_number: number,
                barcode_format: format.as_deref().map(parse_format).transpose()?,
                category,
                color,
                notes,
                favorite: None,
                location: location_edit,
            };
            let result = api.edit_card(index, update)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Delete { index }) => {
            let result = api.delete_card(index)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Fav { index }) => {
            let result = api.set_favorite(index, true)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Unfav { index }) => {
            let result = api.set_favorite(index, false)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Scan {
            decoded,
            hint,
            name,
            category,
            color,
        }) => {
            let mut draft = ScanCapture::new(decoded, hint).into_draft();
            draft.name = name;
            draft.category = category;
            draft.color = color;
            let format = draft.barcode_format;
            let result = api.add_card(draft)?;
            println!("{}", format!("Scanned as {}", format).dimmed());
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Export { output }) => {
            let result = api.export_backup(output)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Import { path }) => {
            let result = api.import_backup(&path)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => {
            let action = parse_config_action(key.as_deref(), value.as_deref())?;
            let result = api.config(action)?;
            print_messages(&result.messages);
            Ok(())
        }
        None => handle_list(&mut api, None, None, None),
    }
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Ok(home) = std::env::var("CARDZ_HOME") {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "cardz", "cardz")
        .ok_or_else(|| CardzError::Store("Could not determine data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn handle_list(
    api: &mut CardzApi<FsBackend>,
    search: Option<String>,
    category: Option<String>,
    near: Option<String>,
) -> Result<()> {
    let category = category
        .as_deref()
        .map(CategoryFilter::from)
        .unwrap_or(CategoryFilter::All);
    let reference = near.as_deref().map(parse_coordinates).transpose()?;

    if category == CategoryFilter::Nearby && reference.is_none() {
        println!(
            "{}",
            "The nearby filter needs a reference location: --near LAT,LNG".yellow()
        );
    }

    let query = CardQuery {
        search_term: search.unwrap_or_default(),
        category,
        sort_by: api.settings().sort_by,
        reference,
    };

    // Canonical indexes: positions in the full unfiltered list, so an
    // index printed under any filter still addresses the same card.
    let canonical_index: HashMap<String, usize> = api
        .canonical_cards()
        .into_iter()
        .enumerate()
        .map(|(i, card)| (card.id, i + 1))
        .collect();

    let result = api.list_cards(&query)?;
    print_cards(&result.listed_cards, &canonical_index);
    print_messages(&result.messages);
    Ok(())
}

fn parse_format(s: &str) -> Result<cardz::model::BarcodeFormat> {
    s.parse().map_err(CardzError::Api)
}

fn parse_coordinates(s: &str) -> Result<Coordinates> {
    let err = || CardzError::Api(format!("Invalid location \"{}\": expected LAT,LNG", s));
    let (lat, lng) = s.split_once(',').ok_or_else(err)?;
    let lat: f64 = lat.trim().parse().map_err(|_| err())?;
    let lng: f64 = lng.trim().parse().map_err(|_| err())?;
    Ok(Coordinates::new(lat, lng))
}

fn parse_card_location(
    location: Option<&str>,
    name: Option<String>,
) -> Result<Option<CardLocation>> {
    match location {
        Some(s) => {
            let coords = parse_coordinates(s)?;
            Ok(Some(CardLocation::new(coords.lat, coords.lng, name)))
        }
        None if name.is_some() => Err(CardzError::Api(
            "--location-name needs --location LAT,LNG".to_string(),
        )),
        None => Ok(None),
    }
}

fn parse_config_action(key: Option<&str>, value: Option<&str>) -> Result<ConfigAction> {
    match (key, value) {
        (None, _) => Ok(ConfigAction::ShowAll),
        (Some("theme"), None) => Ok(ConfigAction::ShowKey("theme".to_string())),
        (Some("theme"), Some(v)) => {
            let theme: Theme = v.parse().map_err(CardzError::Api)?;
            Ok(ConfigAction::SetTheme(theme))
        }
        (Some("sort"), None) => Ok(ConfigAction::ShowKey("sort".to_string())),
        (Some("sort"), Some(v)) => {
            let sort: SortBy = v.parse().map_err(CardzError::Api)?;
            Ok(ConfigAction::SetSort(sort))
        }
        (Some(other), _) => Err(CardzError::Api(format!("Unknown config key: {}", other))),
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FAV_MARKER: &str = "★";

fn print_cards(cards: &[Card], canonical_index: &HashMap<String, usize>) {
    if cards.is_empty() {
        println!("No cards found.");
        return;
    }

    for card in cards {
        let idx_str = match canonical_index.get(&card.id) {
            Some(n) => format!("{}. ", n),
            None => "   ".to_string(),
        };

        let fav_prefix = if card.favorite {
            format!("{} ", FAV_MARKER)
        } else {
            "  ".to_string()
        };

        let place = card
            .location
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .map(|name| suburb(name))
            .unwrap_or_default();

        let mut meta = card.category.clone();
        if !place.is_empty() {
            meta.push_str(" · ");
            meta.push_str(&place);
        }

        let time_ago = card
            .last_used
            .map(format_time_ago)
            .unwrap_or_else(|| format!("{:>width$}", "never", width = TIME_WIDTH));

        let label = format!("{} ({})", card.name, meta);
        let fixed_width = fav_prefix.width() + idx_str.width() + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        println!(
            "{}{}{}{}  {}",
            fav_prefix.yellow(),
            idx_str,
            label_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn print_card_detail(card: &Card) {
    println!("{}", card.name.bold());
    println!("--------------------------------");
    println!("{}", format_card_number(&card.card_number));
    println!("{}", format!("format: {}", card.barcode_format).dimmed());
    println!("{}", format!("category: {}", card.category).dimmed());
    if let Some(location) = &card.location {
        let label = location
            .name
            .clone()
            .unwrap_or_else(|| format!("{:.5}, {:.5}", location.lat, location.lng));
        println!("{}", format!("location: {}", label).dimmed());
    }
    if !card.notes.is_empty() {
        println!("{}", card.notes);
    }
    if let Some(last_used) = card.last_used {
        println!("{}", format!("last used {}", format_time_ago(last_used).trim()).dimmed());
    }
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
