//! Text rendering of target and evolved grids.

use std::io::{self, Write};

use log::warn;

use crate::compute::evolution::{Chromosome, Observer, genome_distance};
use crate::schema::TargetImage;

const ON: char = '#';
const OFF: char = '.';
const GUTTER: &str = "   ";

/// Render `target` and `genes` side by side, one text row per grid row.
///
/// # Panics
/// Panics if `genes` does not have one gene per target cell.
pub fn render_side_by_side(target: &TargetImage, genes: &[u8]) -> String {
    assert_eq!(
        genes.len(),
        target.len(),
        "genome length {} does not match target length {}",
        genes.len(),
        target.len()
    );

    let width = target.width();
    let mut out = String::with_capacity((2 * width + GUTTER.len() + 1) * target.height());
    for (target_row, evolved_row) in target.rows().zip(genes.chunks(width)) {
        push_row(&mut out, target_row);
        out.push_str(GUTTER);
        push_row(&mut out, evolved_row);
        out.push('\n');
    }
    out
}

fn push_row(out: &mut String, bits: &[u8]) {
    out.extend(bits.iter().map(|&b| if b == 1 { ON } else { OFF }));
}

/// Observer that draws the best chromosome every `interval` generations.
///
/// An interval of 0 disables drawing. Write failures are logged and
/// otherwise ignored so that a closed terminal never stops a run.
pub struct TerminalRenderer<W: Write> {
    out: W,
    interval: usize,
    generation: usize,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(interval: usize) -> Self {
        Self::new(io::stdout(), interval)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, interval: usize) -> Self {
        Self {
            out,
            interval,
            generation: 0,
        }
    }

    fn draw(&mut self, best: &Chromosome, target: &TargetImage) -> io::Result<()> {
        writeln!(
            self.out,
            "Generation {} (fitness {}, {} bits differ)",
            self.generation,
            best.fitness(),
            genome_distance(best.genes(), target.bits())
        )?;
        self.out
            .write_all(render_side_by_side(target, best.genes()).as_bytes())?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for TerminalRenderer<W> {
    fn observe(&mut self, best: &Chromosome, target: &TargetImage) {
        if self.interval > 0 && self.generation % self.interval == 0 {
            if let Err(e) = self.draw(best, target) {
                warn!("Failed to render generation {}: {}", self.generation, e);
            }
        }
        self.generation += 1;
    }
}
