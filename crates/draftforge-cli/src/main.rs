use anyhow::Result;
use draftforge_config::EngineTuning;
use draftforge_engine::{
    LayoutItem, LayoutNode, ParsedInput, Run, parse_input, parse_table,
};
use std::{env, fs, process};

enum Mode {
    Outline,
    Layout,
    Table,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (path, mode) = match args.as_slice() {
        [_, path] => (path.clone(), Mode::Outline),
        [_, path, mode] => {
            let mode = match mode.as_str() {
                "outline" => Mode::Outline,
                "layout" => Mode::Layout,
                "table" => Mode::Table,
                other => {
                    eprintln!("Unknown mode '{other}'");
                    eprintln!("Usage: {} <file> [outline|layout|table]", args[0]);
                    process::exit(1);
                }
            };
            (path.clone(), mode)
        }
        _ => {
            eprintln!("Usage: {} <file> [outline|layout|table]", args[0]);
            process::exit(1);
        }
    };

    let tuning = match EngineTuning::load_or_default() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("falling back to default tuning: {e}");
            EngineTuning::default()
        }
    };

    let raw = fs::read_to_string(&path)?;

    match mode {
        Mode::Table => match parse_table(&raw) {
            Some(record) => {
                if !record.title.is_empty() {
                    println!("# {}", record.title);
                }
                let mut header = format!("{} | {}", record.headers.col1, record.headers.col2);
                if let Some(col3) = &record.headers.col3 {
                    header.push_str(&format!(" | {col3}"));
                }
                println!("{header}");
                for row in &record.rows {
                    let mut line = format!("{} | {}", row.col1, row.col2);
                    if let Some(col3) = &row.col3 {
                        line.push_str(&format!(" | {col3}"));
                    }
                    println!("{line}");
                }
            }
            None => {
                eprintln!("Not a table");
                process::exit(2);
            }
        },
        Mode::Outline => match parse_input(&raw, &tuning.heading) {
            ParsedInput::Delta(_) => println!("(editor-native delta input, passed through)"),
            ParsedInput::Sections(sections) => {
                for section in &sections {
                    let title = section.title_text();
                    let title = if title.is_empty() { "(untitled)" } else { &title };
                    println!(
                        "{:?}  {}  [{} block(s)]",
                        section.kind,
                        title,
                        section.content.len()
                    );
                }
            }
        },
        Mode::Layout => match parse_input(&raw, &tuning.heading) {
            ParsedInput::Delta(_) => println!("(editor-native delta input, passed through)"),
            ParsedInput::Sections(sections) => {
                for node in draftforge_engine::render_sections(&sections) {
                    print_node(&node, 0);
                }
            }
        },
    }

    Ok(())
}

fn print_node(node: &LayoutNode, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        LayoutNode::SectionMark { section_id } => println!("{pad}§ {section_id}"),
        LayoutNode::Heading { runs, preset, .. } => {
            println!("{pad}H[{}pt] {}", preset.size_pt, runs_text(runs));
        }
        LayoutNode::Paragraph { runs, alignment, indent } => {
            println!("{pad}P[{alignment:?}/{indent}] {}", runs_text(runs));
        }
        LayoutNode::List { ordered, items } => {
            println!("{pad}{}", if *ordered { "OL" } else { "UL" });
            for item in items {
                print_item(item, depth + 1);
            }
        }
        LayoutNode::Quote { children } => {
            println!("{pad}>");
            for child in children {
                print_node(child, depth + 1);
            }
        }
        LayoutNode::Code { text } => println!("{pad}CODE {}", text.lines().count()),
        LayoutNode::Rule => println!("{pad}---"),
    }
}

fn print_item(item: &LayoutItem, depth: usize) {
    let pad = "  ".repeat(depth);
    println!("{pad}{} {}", item.marker, runs_text(&item.runs));
    for child in &item.children {
        print_node(child, depth + 1);
    }
}

fn runs_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
