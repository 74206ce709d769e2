//! Ordered feature lists expected by the pretrained predictors.
//! The order is part of the model contract: do not sort.

/// Inputs of the three epitope classifiers (bagging, extra trees, random forest).
pub const CLASSIFIER_FEATURES: [&str; 35] = [
    "start",
    "end",
    "R_Percent",
    "D_Percent",
    "Q_Percent",
    "H_Percent",
    "I_Percent",
    "L_Percent",
    "K_Percent",
    "S_Percent",
    "Theoretical.pI",
    "Aliphatic.Index",
    "Helix.Fraction",
    "Charge.at.pH.7.0",
    "Amphipathicity",
    "p_Molecular.Weight",
    "p_Instability.Index",
    "p_Helix.Fraction",
    "p_Amphipathicity",
    "p_Aliphatic.Index",
    "p_H_Count",
    "p_C_Count",
    "p_N_Count",
    "p_O_Count",
    "p_S_Count",
    "p_TotalAtoms_Count",
    "p_A_Percent",
    "p_D_Percent",
    "p_E_Percent",
    "p_G_Percent",
    "p_I_Percent",
    "p_K_Percent",
    "p_F_Percent",
    "p_T_Percent",
    "p_V_Percent",
];

/// Inputs of the two antigenicity score regressors (XGBoost, LightGBM).
pub const SCORE_FEATURES: [&str; 63] = [
    "start",
    "end",
    "A_Percent",
    "R_Percent",
    "N_Percent",
    "D_Percent",
    "C_Percent",
    "E_Percent",
    "Q_Percent",
    "G_Percent",
    "H_Percent",
    "I_Percent",
    "L_Percent",
    "K_Percent",
    "M_Percent",
    "F_Percent",
    "P_Percent",
    "S_Percent",
    "T_Percent",
    "W_Percent",
    "Y_Percent",
    "V_Percent",
    "H_Count",
    "C_Count",
    "N_Count",
    "S_Count",
    "TotalAtoms_Count",
    "Theoretical.pI",
    "Aliphatic.Index",
    "Positive.Residues",
    "Negative.Residues",
    "Aromatic.Count",
    "Polar.Count",
    "Nonpolar.Count",
    "Molecular.Weight",
    "Instability.Index",
    "Aromaticity",
    "Helix.Fraction",
    "Strand.Fraction",
    "Coil.Fraction",
    "Charge.at.pH.7.0",
    "Amphipathicity",
    "GRAVY.Last.50",
    "p_Instability.Index",
    "p_Helix.Fraction",
    "p_Strand.Fraction",
    "p_Coil.Fraction",
    "p_Charge.at.pH.7.0",
    "p_Amphipathicity",
    "p_Aliphatic.Index",
    "p_Aromatic.Count",
    "p_Nonpolar.Count",
    "p_H_Count",
    "p_C_Count",
    "p_O_Count",
    "p_TotalAtoms_Count",
    "p_R_Percent",
    "p_N_Percent",
    "p_D_Percent",
    "p_E_Percent",
    "p_L_Percent",
    "p_T_Percent",
    "p_W_Percent",
];

/// Row features of the HLA affinity regressors. The full model input is
/// `[extra tree label] ++ HLA_FEATURES ++ [type placeholder, sequence hydrophobicity]`.
pub const HLA_FEATURES: [&str; 40] = [
    "C_Percent",
    "Q_Percent",
    "G_Percent",
    "K_Percent",
    "P_Percent",
    "S_Percent",
    "T_Percent",
    "W_Percent",
    "H_Count",
    "C_Count",
    "N_Count",
    "O_Count",
    "TotalAtoms_Count",
    "Theoretical.pI",
    "Positive.Residues",
    "Negative.Residues",
    "Aromatic.Count",
    "Polar.Count",
    "Nonpolar.Count",
    "Molecular.Weight",
    "Instability.Index",
    "Strand.Fraction",
    "Charge.at.pH.7.0",
    "p_Aromaticity",
    "p_Strand.Fraction",
    "p_Coil.Fraction",
    "p_Gravy",
    "p_Amphipathicity",
    "p_GRAVY.Last.50",
    "p_Aliphatic.Index",
    "p_Polar.Count",
    "p_N_Percent",
    "p_C_Percent",
    "p_K_Percent",
    "p_F_Percent",
    "p_P_Percent",
    "p_S_Percent",
    "p_T_Percent",
    "p_W_Percent",
    "p_V_Percent",
];

/// Total length of the HLA model input.
pub const HLA_INPUT_LEN: usize = HLA_FEATURES.len() + 3;
