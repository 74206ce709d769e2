//! Residue-level constant tables: alphabet, hydropathy, atom composition,
//! average residue masses and the dipeptide instability weights.

use phf::phf_map;

/// The 20 standard residues, in the order used to index every table below.
pub const AMINO_ACIDS: [u8; 20] = *b"ACDEFGHIKLMNPQRSTVWY";

/// Column order of the `<AA>_Percent` features (training column order,
/// not alphabetical).
pub const COMPOSITION_ORDER: [u8; 20] = *b"ARNDCEQGHILKMFPSTWYV";

/// Map a residue to its position in `AMINO_ACIDS`. `None` for anything
/// outside the upper-case 20-letter alphabet.
pub fn aa_index(aa: u8) -> Option<usize> {
    static LOOKUP_TABLE: [i8; 256] = {
        let mut table = [-1i8; 256];
        let mut ii = 0;
        while ii < 20 {
            table[AMINO_ACIDS[ii] as usize] = ii as i8;
            ii += 1;
        }
        table
    };
    match LOOKUP_TABLE[aa as usize] {
        -1 => None,
        idx => Some(idx as usize),
    }
}

/// Kyte-Doolittle hydropathy scale.
pub static KYTE_DOOLITTLE: phf::Map<u8, f64> = phf_map! {
    b'A' => 1.8, b'R' => -4.5, b'N' => -3.5, b'D' => -3.5, b'C' => 2.5,
    b'Q' => -3.5, b'E' => -3.5, b'G' => -0.4, b'H' => -3.2, b'I' => 4.5,
    b'L' => 3.8, b'K' => -3.9, b'M' => 1.9, b'F' => 2.8, b'P' => -1.6,
    b'S' => -0.8, b'T' => -0.7, b'W' => -0.9, b'Y' => -1.3, b'V' => 4.2,
};

/// Hydropathy value of a residue, 0 if unknown.
pub fn hydropathy(aa: u8) -> f64 {
    KYTE_DOOLITTLE.get(&aa).copied().unwrap_or(0.)
}

/// Atom contributions of each residue, in H, C, N, O, S order.
pub static ATOM_CONTRIBUTIONS: phf::Map<u8, [u32; 5]> = phf_map! {
    b'A' => [5, 3, 1, 1, 0], b'R' => [17, 6, 4, 2, 0], b'N' => [8, 4, 2, 2, 0],
    b'D' => [7, 4, 1, 3, 0], b'C' => [7, 3, 1, 1, 1], b'E' => [9, 5, 1, 3, 0],
    b'Q' => [10, 5, 2, 2, 0], b'G' => [3, 2, 1, 1, 0], b'H' => [11, 6, 3, 2, 0],
    b'I' => [11, 6, 1, 2, 0], b'L' => [11, 6, 1, 2, 0], b'K' => [14, 6, 2, 2, 0],
    b'M' => [11, 5, 1, 2, 1], b'F' => [11, 9, 1, 1, 0], b'P' => [9, 5, 1, 1, 0],
    b'S' => [9, 3, 1, 2, 0], b'T' => [11, 4, 1, 2, 0], b'W' => [14, 11, 2, 1, 0],
    b'Y' => [12, 6, 1, 3, 0], b'V' => [9, 5, 1, 1, 0],
};

/// Average mass of the free amino acids (Da).
pub static RESIDUE_WEIGHTS: phf::Map<u8, f64> = phf_map! {
    b'A' => 89.0932, b'C' => 121.1582, b'D' => 133.1027, b'E' => 147.1293,
    b'F' => 165.1891, b'G' => 75.0666, b'H' => 155.1546, b'I' => 131.1729,
    b'K' => 146.1876, b'L' => 131.1729, b'M' => 149.2113, b'N' => 132.1179,
    b'P' => 115.1305, b'Q' => 146.1445, b'R' => 174.201, b'S' => 105.0926,
    b'T' => 119.1192, b'V' => 117.1463, b'W' => 204.2252, b'Y' => 181.1885,
};

/// Average mass of water, lost at every peptide bond.
pub const WATER_WEIGHT: f64 = 18.01528;

/// Dipeptide instability weight values (Guruprasad et al., 1990).
/// `DIWV[aa_index(x)][aa_index(y)]` is the weight of the dipeptide `xy`.
pub const DIWV: [[f64; 20]; 20] = [
    // A
    [1.0, 44.94, -7.49, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 1.0, 1.0, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    // C
    [1.0, 1.0, 20.26, 1.0, 1.0, 1.0, 33.6, 1.0, 1.0, 20.26, 33.6, 1.0, 20.26, -6.54, 1.0, 1.0, 33.6, -6.54, 24.68, 1.0],
    // D
    [1.0, 1.0, 1.0, 1.0, -6.54, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 1.0, 1.0, -6.54, 20.26, -14.03, 1.0, 1.0, 1.0],
    // E
    [1.0, 44.94, 20.26, 33.6, 1.0, 1.0, -6.54, 20.26, 1.0, 1.0, 1.0, 1.0, 20.26, 20.26, 1.0, 20.26, 1.0, 1.0, -14.03, 1.0],
    // F
    [1.0, 1.0, 13.34, 1.0, 1.0, 1.0, 1.0, 1.0, -14.03, 1.0, 1.0, 1.0, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 33.601],
    // G
    [-7.49, 1.0, 1.0, -6.54, 1.0, 13.34, 1.0, -7.49, -7.49, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, 13.34, -7.49],
    // H
    [1.0, 1.0, 1.0, 1.0, -9.37, -9.37, 1.0, 44.94, 24.68, 1.0, 1.0, 24.68, -1.88, 1.0, 1.0, 1.0, -6.54, 1.0, -1.88, 44.94],
    // I
    [1.0, 1.0, 1.0, 44.94, 1.0, 1.0, 13.34, 1.0, -7.49, 20.26, 1.0, 1.0, -1.88, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0],
    // K
    [1.0, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, -7.49, 1.0, -7.49, 33.6, 1.0, -6.54, 24.64, 33.6, 1.0, 1.0, -7.49, 1.0, 1.0],
    // L
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 20.26, 33.6, 20.26, 1.0, 1.0, 1.0, 24.68, 1.0],
    // M
    [13.34, 1.0, 1.0, 1.0, 1.0, 1.0, 58.28, 1.0, 1.0, 1.0, -1.88, 1.0, 44.94, -6.54, -6.54, 44.94, -1.88, 1.0, 1.0, 24.68],
    // N
    [1.0, -1.88, 1.0, 1.0, -14.03, -14.03, 1.0, 44.94, 24.68, 1.0, 1.0, 1.0, -1.88, -6.54, 1.0, 1.0, -7.49, 1.0, -9.37, 1.0],
    // P
    [20.26, -6.54, -6.54, 18.38, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, -6.54, 1.0, 20.26, 20.26, -6.54, 20.26, 1.0, 20.26, -1.88, 1.0],
    // Q
    [1.0, -6.54, 20.26, 20.26, -6.54, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 20.26, 20.26, 1.0, 44.94, 1.0, -6.54, 1.0, -6.54],
    // R
    [1.0, 1.0, 1.0, 1.0, 1.0, -7.49, 20.26, 1.0, 1.0, 1.0, 1.0, 13.34, 20.26, 20.26, 58.28, 44.94, 1.0, 1.0, 58.28, -6.54],
    // S
    [1.0, 33.6, 1.0, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 44.94, 20.26, 20.26, 20.26, 1.0, 1.0, 1.0, 1.0],
    // T
    [1.0, 1.0, 1.0, 20.26, 13.34, -7.49, 1.0, 1.0, 1.0, 1.0, 1.0, -14.03, 1.0, -6.54, 1.0, 1.0, 1.0, 1.0, -14.03, 1.0],
    // V
    [1.0, 1.0, -14.03, 1.0, 1.0, -7.49, 1.0, 1.0, -1.88, 1.0, 1.0, 1.0, 20.26, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, -6.54],
    // W
    [-14.03, 1.0, 1.0, 1.0, 1.0, -9.37, 24.68, 1.0, 1.0, 13.34, 24.68, 13.34, 1.0, 1.0, 1.0, 1.0, -14.03, -7.49, 1.0, 1.0],
    // Y
    [24.68, 1.0, 24.68, -6.54, 1.0, -7.49, 13.34, 1.0, 1.0, 1.0, 44.94, 1.0, 13.34, 1.0, -15.91, 1.0, -7.49, 1.0, -9.37, 13.34],
];
