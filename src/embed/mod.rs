use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};
use crate::error::{Error, Result};
use crate::sample::{Sample, SampleTable};

mod openai;

pub use openai::OpenAiEmbeddings;

/// Capability of mapping a label to its embedding. Every vector produced
/// during a run is expected to have the same length; failures are fatal for the run.
pub trait EmbeddingSource {

    fn generate(&self, label : &str) -> Result<Vec<f64>>;

}

impl<F> EmbeddingSource for F
where
    F : Fn(&str) -> Result<Vec<f64>>
{

    fn generate(&self, label : &str) -> Result<Vec<f64>> {
        self(label)
    }

}

/// Embeds each label in turn, in the informed order. Aborts on the first
/// failure: no partial set of samples is ever returned.
pub fn embed_all<E, S>(source : &E, labels : &[S]) -> Result<Vec<Sample>>
where
    E : EmbeddingSource + ?Sized,
    S : AsRef<str>
{
    info!("Embedding {} labels", labels.len());
    let mut samples = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.as_ref();
        let vector = source.generate(label)?;
        debug!("Embedded '{}' ({} dimensions)", label, vector.len());
        samples.push(Sample::new(label, vector));
    }
    Ok(samples)
}

/// Embeddings computed ahead of time, kept in their original order. Serves as
/// an offline source: the JSON form is an array of {"label", "vector"} objects.
#[derive(Debug, Clone, Default)]
pub struct StoredEmbeddings {

    samples : Vec<Sample>

}

impl StoredEmbeddings {

    pub fn new(samples : Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn from_reader<R>(reader : R) -> Result<Self>
    where
        R : Read
    {
        let samples : Vec<Sample> = serde_json::from_reader(reader)?;
        Ok(Self { samples })
    }

    pub fn open<P>(path : P) -> Result<Self>
    where
        P : AsRef<Path>
    {
        let f = File::open(path)?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_writer<W>(&self, writer : W) -> Result<()>
    where
        W : Write
    {
        serde_json::to_writer_pretty(writer, &self.samples)?;
        Ok(())
    }

    pub fn save<P>(&self, path : P) -> Result<()>
    where
        P : AsRef<Path>
    {
        let mut w = BufWriter::new(File::create(path)?);
        self.to_writer(&mut w)?;
        w.flush()?;
        Ok(())
    }

    /// Labels in stored order.
    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.label.clone() ).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Assembles the stored samples positionally, so repeated labels keep
    /// their own vectors.
    pub fn into_table(self) -> Result<SampleTable> {
        SampleTable::new(self.samples)
    }

}

impl<'a> From<&'a SampleTable> for StoredEmbeddings {

    fn from(tbl : &'a SampleTable) -> Self {
        Self::new(tbl.samples().to_vec())
    }

}

// Lookup by label is only defined when the label is stored once.
impl EmbeddingSource for StoredEmbeddings {

    fn generate(&self, label : &str) -> Result<Vec<f64>> {
        let fail = |message : &str| Error::Provider { label : label.to_string(), message : message.to_string() };
        let mut found = self.samples.iter().filter(|s| s.label == label );
        match (found.next(), found.next()) {
            (Some(s), None) => Ok(s.vector.clone()),
            (Some(_), Some(_)) => Err(fail("label is stored more than once")),
            (None, _) => Err(fail("no stored embedding for this label"))
        }
    }

}
