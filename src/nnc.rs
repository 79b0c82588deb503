use serde::{Deserialize, Serialize};

/// One non-neighbor connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NncEntry {
    /// Cartesian index of the first cell.
    pub cell1: usize,
    /// Cartesian index of the second cell.
    pub cell2: usize,
    /// Transmissibility of the connection.
    pub trans: f64,
}

/// Ordered registry of non-neighbor connections.
///
/// Stored as three index-aligned arrays. Entries are only ever appended, so
/// the arrays always have the same length. Serializes as a list of
/// [`NncEntry`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<NncEntry>", into = "Vec<NncEntry>")]
pub struct Nnc {
    nnc1: Vec<usize>,
    nnc2: Vec<usize>,
    trans: Vec<f64>,
}

impl Nnc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nnc1: Vec::with_capacity(capacity),
            nnc2: Vec::with_capacity(capacity),
            trans: Vec::with_capacity(capacity),
        }
    }

    pub fn add_nnc(&mut self, cell1: usize, cell2: usize, trans: f64) {
        self.nnc1.push(cell1);
        self.nnc2.push(cell2);
        self.trans.push(trans);
    }

    pub fn has_nnc(&self) -> bool {
        !self.nnc1.is_empty()
    }

    pub fn num_nnc(&self) -> usize {
        self.nnc1.len()
    }

    /// First cell of every connection.
    pub fn nnc1(&self) -> &[usize] {
        &self.nnc1
    }

    /// Second cell of every connection.
    pub fn nnc2(&self) -> &[usize] {
        &self.nnc2
    }

    pub fn trans(&self) -> &[f64] {
        &self.trans
    }

    pub fn get(&self, index: usize) -> Option<NncEntry> {
        Some(NncEntry {
            cell1: *self.nnc1.get(index)?,
            cell2: self.nnc2[index],
            trans: self.trans[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = NncEntry> + '_ {
        self.nnc1
            .iter()
            .zip(&self.nnc2)
            .zip(&self.trans)
            .map(|((&cell1, &cell2), &trans)| NncEntry {
                cell1,
                cell2,
                trans,
            })
    }
}

impl Extend<NncEntry> for Nnc {
    fn extend<T: IntoIterator<Item = NncEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.add_nnc(entry.cell1, entry.cell2, entry.trans);
        }
    }
}

impl FromIterator<NncEntry> for Nnc {
    fn from_iter<T: IntoIterator<Item = NncEntry>>(iter: T) -> Self {
        let mut nnc = Nnc::new();
        nnc.extend(iter);
        nnc
    }
}

impl From<Vec<NncEntry>> for Nnc {
    fn from(entries: Vec<NncEntry>) -> Self {
        let mut nnc = Nnc::with_capacity(entries.len());
        nnc.extend(entries);
        nnc
    }
}

impl From<Nnc> for Vec<NncEntry> {
    fn from(nnc: Nnc) -> Self {
        nnc.iter().collect()
    }
}
