// Interactive shell for the book catalog.
//
// A thin consumer of the library API: prompts on stdin, dispatches to the
// catalog, prints results or errors, and never lets a catalog error kill the
// session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing_subscriber::EnvFilter;

use book_catalog::{Book, Catalog, SearchCriteria};

/// Manage a book catalog backed by a JSON file
#[derive(Parser, Debug)]
#[command(name = "book-catalog", version)]
struct Args {
    /// Path to the backing JSON file
    #[arg(short, long, default_value = "library.json")]
    file: PathBuf,
}

/// Table row for the all-books listing
#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        BookRow {
            id: book.id().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year(),
            status: book.status().to_string(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut catalog = Catalog::with_file(&args.file)
        .with_context(|| format!("failed to load catalog from {}", args.file.display()))?;

    println!(
        "Book catalog ({} book(s) loaded from {})",
        catalog.len(),
        args.file.display()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(command) = prompt(&mut lines, "Choose a command: ")? else {
            break;
        };

        match command.trim() {
            "1" => add_book(&mut catalog, &mut lines)?,
            "2" => remove_book(&mut catalog, &mut lines)?,
            "3" => search_books(&catalog, &mut lines)?,
            "4" => list_books(&catalog),
            "5" => update_status(&mut catalog, &mut lines)?,
            "6" => match catalog.save() {
                Ok(()) => println!("Catalog saved."),
                Err(e) => println!("Failed to save catalog: {e}"),
            },
            "7" => match catalog.load() {
                Ok(()) => println!("Catalog loaded."),
                Err(e) => println!("Failed to load catalog: {e}"),
            },
            "8" => {
                println!("Bye.");
                break;
            }
            "" => {}
            _ => println!("Unknown command."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("Available commands:");
    println!("  1. Add a book");
    println!("  2. Remove a book");
    println!("  3. Search books");
    println!("  4. List all books");
    println!("  5. Update book status");
    println!("  6. Save catalog to file");
    println!("  7. Load catalog from file");
    println!("  8. Quit");
    println!();
}

/// Print a prompt and read one trimmed line; `None` on end of input.
fn prompt<I>(lines: &mut I, message: &str) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{message}");
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn add_book<I>(catalog: &mut Catalog, lines: &mut I) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(title) = prompt(lines, "Title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt(lines, "Author: ")? else {
        return Ok(());
    };
    let Some(year_raw) = prompt(lines, "Publication year: ")? else {
        return Ok(());
    };

    let year: i32 = match year_raw.parse() {
        Ok(year) => year,
        Err(_) => {
            println!("Year must be an integer.");
            return Ok(());
        }
    };

    match catalog.add(title, author, year) {
        Ok(book) => println!("Book added with id {}.", book.id()),
        Err(e) => println!("Failed to add book: {e}"),
    }
    Ok(())
}

fn remove_book<I>(catalog: &mut Catalog, lines: &mut I) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(id) = prompt(lines, "Book id to remove: ")? else {
        return Ok(());
    };

    match catalog.remove(&id) {
        Ok(book) => println!("Removed: {book}"),
        Err(e) => println!("Failed to remove book: {e}"),
    }
    Ok(())
}

fn search_books<I>(catalog: &Catalog, lines: &mut I) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    println!("Search filters (press Enter to skip one):");

    let mut pairs: Vec<(String, Value)> = Vec::new();

    let Some(title) = prompt(lines, "Title: ")? else {
        return Ok(());
    };
    if !title.is_empty() {
        pairs.push(("title".to_string(), json!(title)));
    }

    let Some(author) = prompt(lines, "Author: ")? else {
        return Ok(());
    };
    if !author.is_empty() {
        pairs.push(("author".to_string(), json!(author)));
    }

    let Some(year_raw) = prompt(lines, "Publication year: ")? else {
        return Ok(());
    };
    if !year_raw.is_empty() {
        match year_raw.parse::<i32>() {
            Ok(year) => pairs.push(("year".to_string(), json!(year))),
            Err(_) => {
                println!("Year must be an integer.");
                return Ok(());
            }
        }
    }

    let criteria = match SearchCriteria::from_pairs(&pairs) {
        Ok(criteria) => criteria,
        Err(e) => {
            println!("Search failed: {e}");
            return Ok(());
        }
    };

    let matches = catalog.search(&criteria);
    if matches.is_empty() {
        println!("No books found.");
    } else {
        for book in matches {
            println!("{book}");
        }
    }
    Ok(())
}

fn list_books(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("Catalog is empty.");
        return;
    }

    let mut rows: Vec<BookRow> = catalog.books().map(BookRow::from).collect();
    rows.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
}

fn update_status<I>(catalog: &mut Catalog, lines: &mut I) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let Some(id) = prompt(lines, "Book id: ")? else {
        return Ok(());
    };
    let Some(status) = prompt(lines, "New status (available / checked-out): ")? else {
        return Ok(());
    };

    match catalog.update_status(&id, &status) {
        Ok(()) => println!("Status updated."),
        Err(e) => println!("Failed to update status: {e}"),
    }
    Ok(())
}
