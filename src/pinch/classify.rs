/// Role of a cell in the column scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    /// Takes part in normal grid connectivity; never bypassed.
    Active,
    /// Inactive, or too small in pore volume or thickness; may be bypassed.
    PinchCandidate,
}

impl CellStatus {
    pub fn is_active(self) -> bool {
        self == CellStatus::Active
    }
}

/// Per-cell pinch decision from the `MINPV` / `PINCH` thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchClassifier {
    min_pore_volume: f64,
    thickness: f64,
}

impl PinchClassifier {
    pub fn new(min_pore_volume: f64, thickness: f64) -> Self {
        Self {
            min_pore_volume,
            thickness,
        }
    }

    /// A cell is active only if it is flagged active and neither its pore
    /// volume nor its thickness falls below the thresholds. NaN values count
    /// as below. A cell with neither pore volume nor thickness is a candidate
    /// even with zero thresholds.
    pub fn classify(&self, active: bool, porv: f64, dz: f64) -> CellStatus {
        if porv <= 0.0 && dz <= 0.0 {
            return CellStatus::PinchCandidate;
        }
        let enough_pv = porv >= self.min_pore_volume;
        let thick_enough = dz >= self.thickness;
        if active && enough_pv && thick_enough {
            CellStatus::Active
        } else {
            CellStatus::PinchCandidate
        }
    }
}
