//! prompt - Interactive search loop over one root deck
//!
//! Each input line is a new search text; the whole result screen is
//! printed again after every search. `:q` or end of input stops.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

use super::{remember, write_search, OutputOptions};
use crate::engine::Engine;
use crate::history::HistoryLocation;
use crate::view::layout::Page;

pub const QUIT: &str = ":q";
pub const PROMPT: &str = "search> ";

/// Run the loop over arbitrary input and output streams
pub fn prompt_loop<R: BufRead, W: Write>(
    root: &Path,
    options: &OutputOptions,
    history: &HistoryLocation,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut engine = Engine::new();
    engine.find(root, "");
    write_search(&engine, Page::default(), options, &mut output)?;

    let mut searches = 0;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line == QUIT {
            break;
        }

        engine.find(root, &line);
        searches += 1;
        tracing::debug!("search #{}: {:?}", searches, line);

        remember(history, &engine)?;
        write_search(&engine, Page::default(), options, &mut output)?;
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(searches)
}

pub fn run_prompt(file: &Path, options: &OutputOptions, history: &HistoryLocation) -> Result<()> {
    let stdin = std::io::stdin();
    let searches = prompt_loop(file, options, history, stdin.lock(), std::io::stdout().lock())?;
    tracing::info!("prompt finished after {} searches", searches);
    Ok(())
}
