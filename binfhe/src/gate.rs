use serde::{Deserialize, Serialize};

/// The binary gates evaluated with a single bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinGate {
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `!(a & b)`
    Nand,
    /// `!(a | b)`
    Nor,
    /// `a ^ b`
    Xor,
    /// `!(a ^ b)`
    Xnor,
}

impl BinGate {
    /// Every binary gate.
    pub const ALL: [BinGate; 6] = [
        BinGate::And,
        BinGate::Or,
        BinGate::Nand,
        BinGate::Nor,
        BinGate::Xor,
        BinGate::Xnor,
    ];

    /// Returns true if the gate doubles `ct1 + ct2` before bootstrapping.
    #[inline]
    pub fn is_doubled(self) -> bool {
        matches!(self, BinGate::Xor | BinGate::Xnor)
    }

    /// Returns the bootstrap threshold `q1` for the LWE modulus `q`.
    ///
    /// The gate outputs 1 exactly when the combined phase lies outside `[q1, q1 + q/2)`.
    #[inline]
    pub fn threshold(self, q: u64) -> u64 {
        match self {
            BinGate::And => 7 * q / 8,
            BinGate::Or => 5 * q / 8,
            BinGate::Nand => 3 * q / 8,
            BinGate::Nor => q / 8,
            BinGate::Xor => 3 * q / 4,
            BinGate::Xnor => q / 4,
        }
    }

    /// Evaluates the gate on plain bits.
    #[inline]
    pub fn evaluate(self, a: bool, b: bool) -> bool {
        match self {
            BinGate::And => a & b,
            BinGate::Or => a | b,
            BinGate::Nand => !(a & b),
            BinGate::Nor => !(a | b),
            BinGate::Xor => a ^ b,
            BinGate::Xnor => !(a ^ b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_match_truth_tables() {
        let q = 1024u64;
        let quarter = q / 4;
        for gate in BinGate::ALL {
            for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
                let mut phase = (a as u64 + b as u64) * quarter;
                if gate.is_doubled() {
                    phase = (2 * phase) % q;
                }
                let outside = (phase + q - gate.threshold(q)) % q >= q / 2;
                assert_eq!(outside, gate.evaluate(a, b), "{gate:?} {a} {b}");
            }
        }
    }
}
