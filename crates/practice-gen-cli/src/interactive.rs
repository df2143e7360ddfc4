//! Interactive prompt loop

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::debug;

use practice_gen_core::{parse, Catalog, Result, ValidatedSelection};

const LIST: &str = "list";

pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  Input the categories and the number of problems for each category"
    )?;
    writeln!(
        out,
        "  that you want in the generated problem set. Separate the category"
    )?;
    writeln!(out, "  and number of problems by commas and spaces.")?;
    writeln!(
        out,
        "  Example input: {}",
        "intro-to-arrays: 2, basic-loops: 1, nested-loops: all".yellow()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  If you would like ALL problems from ALL categories, then input:"
    )?;
    writeln!(out, "  {}", "all".yellow())?;
    writeln!(out)?;
    writeln!(
        out,
        "  If you'd like all problems, EXCEPT certain categories, then input 'all'"
    )?;
    writeln!(out, "  followed by ', except: category'.")?;
    writeln!(out, "  Example input: {}", "all, except: bonus".yellow())?;
    writeln!(out)?;
    writeln!(out, "  To list all categories, input:")?;
    writeln!(out, "  {}", LIST.yellow())?;
    writeln!(out)?;
    Ok(())
}

pub fn print_categories<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  Available categories:")?;
    for category in catalog.categories() {
        writeln!(
            out,
            "  {} {}",
            category.name.cyan(),
            format!("({})", category.artifacts.len()).dimmed()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Ask until the answer parses and validates.
///
/// `list` prints the catalog and asks again without repeating the help text.
/// Parse and validation errors are shown and the question is repeated; any
/// other error is returned. `Ok(None)` means input ended before a valid answer.
pub fn ask_selection<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    catalog: &Catalog,
) -> Result<Option<ValidatedSelection>> {
    let mut show_help = true;
    let mut last_error: Option<String> = None;

    loop {
        if show_help {
            print_help(out)?;
        }
        if let Some(message) = last_error.take() {
            writeln!(out, "{}", message.red())?;
        }

        write!(out, "{}", "> ".yellow())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();

        if answer == LIST {
            print_categories(out, catalog)?;
            show_help = false;
            continue;
        }

        match parse(answer).and_then(|spec| spec.validate(catalog)) {
            Ok(selection) => return Ok(Some(selection)),
            Err(e) if e.is_recoverable() => {
                debug!(error = ?e, answer, "rejected selection");
                last_error = Some(e.to_string());
                show_help = true;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    use practice_gen_core::{CategoryCount, Count, LibraryConfig, LocalFs};

    use super::*;

    fn catalog(root: &Path) -> Catalog {
        for category in ["intro-to-arrays", "bonus"] {
            let dir = root.join("categories").join(category);
            fs::create_dir_all(dir.join("problems")).unwrap();
            fs::create_dir_all(dir.join("test")).unwrap();
            fs::write(dir.join("problems/a.js"), "a").unwrap();
            fs::write(dir.join("test/a-spec.js"), "a").unwrap();
        }
        Catalog::load(
            &LocalFs::default(),
            &root.join("categories"),
            &LibraryConfig::default(),
        )
        .unwrap()
    }

    fn run(answers: &str) -> (Option<ValidatedSelection>, String) {
        colored::control::set_override(false);
        let tmp = tempfile::TempDir::new().unwrap();
        let catalog = catalog(tmp.path());

        let mut input = Cursor::new(answers.to_string());
        let mut out = Vec::new();
        let selection = ask_selection(&mut input, &mut out, &catalog).unwrap();
        (selection, String::from_utf8(out).unwrap())
    }

    #[test]
    fn first_valid_answer_wins() {
        let (selection, out) = run("intro-to-arrays: 1\n");
        assert_eq!(
            selection,
            Some(ValidatedSelection::PerCategory(vec![CategoryCount {
                category: "intro-to-arrays".into(),
                count: Count::Exactly(1),
            }]))
        );
        assert!(out.contains("Example input"));
    }

    #[test]
    fn list_shows_categories_then_asks_again() {
        let (selection, out) = run("list\nall\n");
        assert_eq!(selection, Some(ValidatedSelection::AllCategories));
        assert!(out.contains("Available categories:"));
        assert!(out.contains("bonus"));
        // Help only printed once: before the first prompt
        assert_eq!(out.matches("To list all categories").count(), 1);
    }

    #[test]
    fn errors_are_shown_and_question_repeated() {
        let (selection, out) = run("all,\nnope: 1\nbonus: -2\nbonus: 3\n");
        assert!(selection.is_some());
        assert!(out.contains("Invalid input. Please submit a valid input"));
        assert!(out.contains("Invalid categories: nope"));
        assert!(out.contains("Invalid number of problems for bonus: -2"));
        assert_eq!(out.matches("To list all categories").count(), 4);
    }

    #[test]
    fn end_of_input_gives_up() {
        let (selection, _) = run("nope: 1\n");
        assert!(selection.is_none());
    }
}
