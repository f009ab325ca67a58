use tracing::info;
use crate::decomp::{Reduction, COMPONENTS};
use crate::embed::{self, EmbeddingSource};
use crate::error::Result;
use crate::sample::SampleTable;
use crate::table::{ResultRow, Sink};

/// How a run ended. An empty label list is a successful run that produces no table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {

    /// No samples: nothing was projected and the sink was never opened.
    Empty,

    /// The table was written, with this many data rows.
    Written(usize)

}

/// Projects a table onto its two leading principal directions, one row per
/// sample in table order. An empty table gives no rows.
pub fn reduce(tbl : &SampleTable) -> Result<Vec<ResultRow>> {
    if tbl.is_empty() {
        return Ok(Vec::new());
    }
    let red = Reduction::fit(tbl, COMPONENTS)?;
    let rows = tbl.samples().iter()
        .zip(red.coords.row_iter())
        .map(|(s, c)| ResultRow { label : s.label.clone(), x : c[0], y : c[1] } )
        .collect();
    Ok(rows)
}

/// Projects an already-assembled table and hands the rows to the sink.
pub fn run_table<K>(tbl : &SampleTable, sink : &mut K) -> Result<Outcome>
where
    K : Sink + ?Sized
{
    if tbl.is_empty() {
        info!("No vectors to project.");
        return Ok(Outcome::Empty);
    }
    let rows = reduce(tbl)?;
    sink.persist(&rows[..])?;
    Ok(Outcome::Written(rows.len()))
}

/// Embeds the labels in order and assembles them into a table.
pub fn assemble<E, S>(labels : &[S], source : &E) -> Result<SampleTable>
where
    E : EmbeddingSource + ?Sized,
    S : AsRef<str>
{
    let samples = embed::embed_all(source, labels)?;
    SampleTable::new(samples)
}

/// Embeds the labels, assembles them into a table, projects it and hands the
/// rows to the sink. Any failure aborts the whole run before the sink is touched.
pub fn run<E, S, K>(labels : &[S], source : &E, sink : &mut K) -> Result<Outcome>
where
    E : EmbeddingSource + ?Sized,
    S : AsRef<str>,
    K : Sink + ?Sized
{
    let tbl = assemble(labels, source)?;
    run_table(&tbl, sink)
}
