use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::Subcommand;
use grind_engine_edit::{
    MapEditor, Position, Trigger, formats::FILE_EXTENSION, palette::glyph_label, parse, parse_with_report, serialize,
};

use crate::Settings;

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    #[command(about = "Create a blank map")]
    New {
        #[arg(help = "Target file; `.map` is appended when it has no extension")]
        file: PathBuf,
        #[arg(help = "Map width (defaults to the settings value)", long)]
        width: Option<i32>,
        #[arg(help = "Map height (defaults to the settings value)", long)]
        height: Option<i32>,
        #[arg(help = "Map name (defaults to the settings value)", long)]
        name: Option<String>,
    },

    #[command(about = "Show name, size, metadata, triggers and load warnings")]
    Info { file: PathBuf },

    #[command(about = "Print the terrain grid")]
    Show { file: PathBuf },

    #[command(about = "Rewrite a map in canonical form")]
    Fmt {
        file: PathBuf,
        #[arg(help = "Only check; fail if the file isn't in canonical form", long, default_value_t = false)]
        check: bool,
    },

    #[command(about = "Set a single cell")]
    Set { file: PathBuf, x: i32, y: i32, glyph: char },

    #[command(about = "Flood fill the region around a cell")]
    Fill {
        file: PathBuf,
        x: i32,
        y: i32,
        #[arg(help = "Fill glyph (defaults to the settings value)")]
        glyph: Option<char>,
    },

    #[command(about = "Resize the map, keeping the top left corner")]
    Resize { file: PathBuf, width: i32, height: i32 },

    #[command(about = "Place an exit trigger")]
    Exit {
        file: PathBuf,
        x: i32,
        y: i32,
        #[arg(help = "Target map name", long)]
        map: Option<String>,
        #[arg(help = "Target x", long)]
        tx: Option<i32>,
        #[arg(help = "Target y", long)]
        ty: Option<i32>,
    },

    #[command(about = "Place a teleport trigger")]
    Teleport {
        file: PathBuf,
        x: i32,
        y: i32,
        #[arg(help = "Target x", long)]
        tx: Option<i32>,
        #[arg(help = "Target y", long)]
        ty: Option<i32>,
    },

    #[command(about = "Remove the trigger at a cell")]
    ClearTrigger { file: PathBuf, x: i32, y: i32 },
}

pub fn run(command: Commands, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Commands::New { file, width, height, name } => {
            let mut editor = MapEditor::default();
            editor.new_map(
                width.unwrap_or(settings.default_width),
                height.unwrap_or(settings.default_height),
                name.unwrap_or_else(|| settings.default_name.clone()),
            )?;
            editor.save_as(with_map_extension(file))?;
            println!("{}", editor.status_line());
        }
        Commands::Info { file } => print_info(&file)?,
        Commands::Show { file } => {
            let editor = open(&file)?;
            for row in editor.get_document().rows() {
                println!("{row}");
            }
        }
        Commands::Fmt { file, check } => format_file(&file, check)?,
        Commands::Set { file, x, y, glyph } => {
            let mut editor = open(&file)?;
            editor.select_glyph(&glyph.to_string());
            ensure_inside(&editor, x, y)?;
            if editor.paint((x, y)) {
                editor.save()?;
            }
        }
        Commands::Fill { file, x, y, glyph } => {
            let mut editor = open(&file)?;
            editor.select_glyph(&glyph.unwrap_or(settings.default_glyph).to_string());
            ensure_inside(&editor, x, y)?;
            let changed = editor.fill((x, y));
            if changed > 0 {
                editor.save()?;
            }
            println!("{changed} cell(s) changed");
        }
        Commands::Resize { file, width, height } => {
            let mut editor = open(&file)?;
            let before = editor.get_document().trigger_count();
            editor.resize(width, height)?;
            let dropped = before - editor.get_document().trigger_count();
            if dropped > 0 {
                log::warn!("{dropped} trigger(s) outside the new size were removed");
            }
            editor.save()?;
            println!("{}", editor.status_line());
        }
        Commands::Exit { file, x, y, map, tx, ty } => {
            let mut editor = open(&file)?;
            let trigger = Trigger::Exit {
                target_map: map,
                target_x: tx,
                target_y: ty,
            };
            editor.place_trigger((x, y), trigger)?;
            editor.save()?;
        }
        Commands::Teleport { file, x, y, tx, ty } => {
            let mut editor = open(&file)?;
            editor.place_trigger((x, y), Trigger::Teleport { target_x: tx, target_y: ty })?;
            editor.save()?;
        }
        Commands::ClearTrigger { file, x, y } => {
            let mut editor = open(&file)?;
            match editor.clear_trigger((x, y)) {
                Some(trigger) => {
                    println!("removed {trigger}");
                    editor.save()?;
                }
                None => println!("no trigger at {}", Position::new(x, y)),
            }
        }
    }
    Ok(())
}

fn open(file: &Path) -> anyhow::Result<MapEditor> {
    let mut editor = MapEditor::default();
    editor.open(file).with_context(|| format!("can't open map '{}'", file.display()))?;
    Ok(editor)
}

fn with_map_extension(mut file: PathBuf) -> PathBuf {
    if file.extension().is_none() {
        file.set_extension(FILE_EXTENSION);
    }
    file
}

fn ensure_inside(editor: &MapEditor, x: i32, y: i32) -> anyhow::Result<()> {
    let doc = editor.get_document();
    if !doc.is_inside((x, y)) {
        bail!("{} is outside the {} map", Position::new(x, y), doc.size());
    }
    Ok(())
}

fn print_info(file: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("can't read '{}'", file.display()))?;
    let report = parse_with_report(&text);
    let editor = MapEditor::from_document(report.document);
    let doc = editor.get_document();

    println!("{}", editor.status_line());
    println!("metadata:");
    for (key, value) in doc.metadata() {
        println!("  {key} = {value}");
    }
    if !doc.extra_header_lines().is_empty() {
        println!("unrecognised header lines:");
        for line in doc.extra_header_lines() {
            println!("  {line}");
        }
    }
    println!("triggers: {}", doc.trigger_count());
    for (pos, trigger) in doc.triggers() {
        let glyph = doc.get_cell(pos);
        let label = glyph_label(glyph).unwrap_or("?");
        println!("  {pos} '{glyph}' ({label}): {trigger}");
    }
    if !report.warnings.is_empty() {
        println!("warnings:");
        for warning in &report.warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}

fn format_file(file: &Path, check: bool) -> anyhow::Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("can't read '{}'", file.display()))?;
    let canonical = serialize(&parse(&text));
    if canonical == text {
        return Ok(());
    }
    if check {
        bail!("'{}' is not in canonical form", file.display());
    }
    fs::write(file, canonical).with_context(|| format!("can't write '{}'", file.display()))?;
    println!("reformatted {}", file.display());
    Ok(())
}
