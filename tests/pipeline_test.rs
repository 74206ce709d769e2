mod common;

use anyhow::Result;
use common::{
    calls, counting_models, models_with, stub_models, write_model_dir, fn_predictor, SizedPredictor,
};
use provax::shared::sequence_hydrophobicity;
use provax::{
    write_csv, EpitopeError, MhcClass, Mode, ModelRole, ModelSet, Pipeline, PipelineParameters,
    Predictor, ReferenceCatalog, Selection,
};
use std::path::Path;

const PROTEIN: &str = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQFEVVHSLAKWKRQTLGQHDFSAGEGLYTHMKALRPDEDRLSPLHSVYVDQWDWERVMGDGERQFSTLKSTVEAIWAGIKATEAAVSEEFGLAPFLPDQIHFVHSQELLSRYPDLDAKGRERAIAKDLGAVFLVGIGGKLSDGHRHDVRAPDYDDWCAAAAAAAAAA";

fn catalog() -> ReferenceCatalog {
    ReferenceCatalog::from_entries(["A1", "I2", "K3", "L1/V2"])
}

#[test]
fn single_window_calls_each_predictor_once() -> Result<()> {
    let (models, counters) = counting_models()?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let reports = pipeline.predict("ACDEFGHIKL", Mode::Mhc1)?;
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.class, MhcClass::One);
    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!((row.start, row.end), (0, 9));
    assert_eq!(row.epitope, "ACDEFGHIKL");
    assert!(row.is_valid());
    for role in ModelRole::ALL {
        assert_eq!(calls(&counters, role), 1, "{}", role);
    }
    Ok(())
}

#[test]
fn invalid_residue_skips_inference() -> Result<()> {
    let (models, counters) = counting_models()?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let reports = pipeline.predict("ACDEFGHIKX", Mode::Mhc1)?;
    let row = &reports[0].rows[0];
    assert!(!row.is_valid());
    assert!(row.matched_hla().is_empty());
    for role in ModelRole::ALL {
        assert_eq!(calls(&counters, role), 0);
    }
    assert_eq!(reports[0].selection, Selection::Filtered(vec![]));
    Ok(())
}

#[test]
fn invalid_residue_anywhere_invalidates_every_window() -> Result<()> {
    let (models, _) = counting_models()?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    // the first windows are valid on their own
    let reports = pipeline.predict("ACDEFGHIKLMNPQX", Mode::Mhc1)?;
    assert_eq!(reports[0].rows.len(), 6);
    assert_eq!(reports[0].n_valid(), 0);
    Ok(())
}

#[test]
fn both_runs_in_order() -> Result<()> {
    let models = stub_models([1., 1., 1.], (0.5, 0.2), (2.0, 0., 0.))?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let seq = "MKTAYIAKQRQISFVKSHFS";
    let reports = pipeline.predict(seq, Mode::Both)?;
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].class, MhcClass::One);
    assert_eq!(reports[0].window_length, 10);
    assert_eq!(reports[0].rows.len(), 11);
    assert_eq!(reports[1].class, MhcClass::Two);
    assert_eq!(reports[1].window_length, 15);
    assert_eq!(reports[1].rows.len(), 6);
    // same as two separate runs
    assert_eq!(reports[1], pipeline.run(seq, MhcClass::Two)?);
    Ok(())
}

#[test]
fn short_sequence_gives_an_empty_report() -> Result<()> {
    let models = stub_models([1., 1., 1.], (0.5, 0.2), (2.0, 0., 0.))?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let reports = pipeline.predict("ACDEF", Mode::Mhc2)?;
    assert!(reports[0].rows.is_empty());
    assert!(reports[0].selection.is_empty());
    Ok(())
}

#[test]
fn target_and_matching() -> Result<()> {
    // bagging says no: not an epitope, but the pair filter still passes
    let models = stub_models([0., 1., 1.], (0.5, 0.2), (8.5, -1., -2.))?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let report = pipeline.run("ACDEFGHIKLM", MhcClass::One)?;
    assert_eq!(report.epitopes().count(), 0);
    let p = report.rows[0].prediction.as_ref().unwrap();
    assert_eq!(p.target, 0);
    assert_eq!(p.scores.xgb, 0.5);
    assert_eq!((p.affinity.lgbm, p.affinity.hist), (-1., -2.));
    // multiplicative scores: A1 1.8, I2 9.0, K3 11.7, L1/V2 3.8 + 8.4
    assert_eq!(p.matched_hla, vec!["I2", "K3", "L1/V2", "A1"]);
    match &report.selection {
        Selection::Filtered(c) => assert_eq!(c.len(), 2),
        other => panic!("unexpected selection {:?}", other),
    }
    Ok(())
}

#[test]
fn stage_inputs() -> Result<()> {
    let seq = "MKTAYIAKQRQISFVKSHFS";
    let hydrophobicity = sequence_hydrophobicity(seq);
    let models = ModelSet::from_predictors(vec![
        (
            ModelRole::BaggingTarget,
            fn_predictor(|x| (x.len() == 35) as u8 as f64),
        ),
        (
            ModelRole::ExtraTreeTarget,
            fn_predictor(|x| (x[0] >= 1.) as u8 as f64),
        ),
        (ModelRole::RandomForestTarget, fn_predictor(|x| x[1] / 100.)),
        (ModelRole::XgbScore, fn_predictor(|x| x.len() as f64)),
        (ModelRole::LgbmScore, fn_predictor(|x| x[0])),
        (ModelRole::ExtraTreeHla, fn_predictor(|x| x[0])),
        (ModelRole::LgbmHla, fn_predictor(|x| x[41])),
        (ModelRole::HistHla, fn_predictor(|x| x[42])),
    ])?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let report = pipeline.run(seq, MhcClass::One)?;
    for row in &report.rows {
        let p = row.prediction.as_ref().unwrap();
        assert_eq!(p.votes.bagging, 1);
        // extra trees is positive from the second window on
        assert_eq!(p.votes.extra_tree, (row.start >= 1) as u8);
        assert_eq!(p.votes.random_forest, 0);
        assert_eq!(p.scores.xgb, 63.);
        assert_eq!(p.scores.lgbm, row.start as f64);
        // the extra trees label leads the affinity inputs
        assert_eq!(p.affinity.extra_tree, p.votes.extra_tree as f64);
        assert_eq!(p.affinity.lgbm, 0.);
        assert_eq!(p.affinity.hist, hydrophobicity);
    }
    Ok(())
}

#[test]
fn failing_predictor_invalidates_the_window_only() -> Result<()> {
    struct Failing;
    impl Predictor for Failing {
        fn predict(&self, features: &[f64]) -> Result<f64> {
            if features[0] == 2. {
                anyhow::bail!("cannot score");
            }
            Ok(1.)
        }
    }
    let models = models_with(ModelRole::XgbScore, Box::new(Failing))?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let report = pipeline.run("MKTAYIAKQRQISF", MhcClass::One)?;
    assert_eq!(report.rows.len(), 5);
    let valid: Vec<bool> = report.rows.iter().map(|r| r.is_valid()).collect();
    assert_eq!(valid, vec![true, true, false, true, true]);
    Ok(())
}

#[test]
fn feature_count_mismatch_is_fatal() -> Result<()> {
    let models = models_with(ModelRole::LgbmHla, Box::new(SizedPredictor(40)))?;
    let err = match Pipeline::new(models, catalog(), PipelineParameters::default()) {
        Ok(_) => panic!("the pipeline accepted a mismatched predictor"),
        Err(e) => e,
    };
    match err.downcast_ref::<EpitopeError>() {
        Some(EpitopeError::FeatureCountMismatch {
            expected, found, ..
        }) => {
            assert_eq!(*expected, 40);
            assert_eq!(*found, 43);
        }
        other => panic!("unexpected error {:?}", other),
    }
    Ok(())
}

#[test]
fn order_is_kept_with_a_dedicated_pool() -> Result<()> {
    let models = stub_models([1., 1., 1.], (0.5, 0.2), (2.0, 0., 0.))?;
    let params = PipelineParameters {
        num_threads: Some(3),
        ..Default::default()
    };
    let pipeline = Pipeline::new(models, catalog(), params)?;
    let seq = PROTEIN;
    let report = pipeline.run(seq, MhcClass::One)?;
    assert_eq!(report.rows.len(), seq.len() - 9);
    for (i, row) in report.rows.iter().enumerate() {
        assert_eq!(row.start, i);
        assert_eq!(row.epitope, &seq[i..i + 10]);
    }
    // every window passes the filter: fallback on the scores
    assert!(matches!(report.selection, Selection::TopScored(_)));
    Ok(())
}

#[test]
fn order_is_kept_with_the_progress_bar() -> Result<()> {
    let models = stub_models([1., 1., 1.], (0.5, 0.2), (2.0, 0., 0.))?;
    let params = PipelineParameters {
        num_threads: Some(4),
        show_progress: true,
        ..Default::default()
    };
    let pipeline = Pipeline::new(models, catalog(), params)?;
    let seq = PROTEIN.repeat(3);
    let report = pipeline.run(&seq, MhcClass::One)?;
    assert_eq!(report.rows.len(), seq.len() - 9);
    for (i, row) in report.rows.iter().enumerate() {
        assert_eq!(row.start, i);
        assert_eq!(row.epitope, &seq[i..i + 10]);
    }
    Ok(())
}

#[test]
fn json_uses_the_output_column_names() -> Result<()> {
    let models = stub_models([1., 1., 0.], (0.5, 0.2), (2.0, 3.0, 4.0))?;
    let pipeline = Pipeline::new(models, catalog(), PipelineParameters::default())?;
    let reports = pipeline.predict("ACDEFGHIKL", Mode::Mhc1)?;
    let value = serde_json::to_value(&reports[0].rows[0])?;
    let p = &value["prediction"];
    assert_eq!(p["scores"]["XGB_predicted_score"], 0.5);
    assert_eq!(p["scores"]["light_gbm_predicted_score"], 0.2);
    assert_eq!(p["votes"]["bagging_target"], 1);
    assert_eq!(p["votes"]["extra_tree_target"], 1);
    assert_eq!(p["votes"]["random_forest_target"], 0);
    assert_eq!(p["affinity"]["extra_tree_hla"], 2.0);
    assert_eq!(p["affinity"]["lgbm_hla_prediction"], 3.0);
    assert_eq!(p["affinity"]["hist_hla"], 4.0);
    assert!(p["scores"].get("xgb").is_none());
    Ok(())
}

#[test]
fn load_from_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_model_dir(dir.path(), 3.)?;
    let catalog_path = dir.path().join("reference.txt");
    std::fs::write(&catalog_path, "A1\nI2\nK3\n")?;

    let params = PipelineParameters {
        nearest_k: 2,
        ..Default::default()
    };
    let pipeline = Pipeline::load(dir.path(), &catalog_path, params)?;
    assert_eq!(pipeline.catalog().len(), 3);
    let reports = pipeline.predict("MKTAYIAKQRQISFVKSHFS", Mode::Mhc1)?;
    let rows = &reports[0].rows;
    assert_eq!(rows.len(), 11);
    for row in rows {
        let p = row.prediction.as_ref().unwrap();
        assert_eq!(p.target, 1);
        // 1.5 up to start 2, 0.5 after
        let expected = if row.start <= 2 { 1.5 } else { 0.5 };
        assert_eq!(p.scores.xgb, expected);
        // affinity 3: A1 (1.8) then I2 (9.0)
        assert_eq!(p.matched_hla, vec!["A1", "I2"]);
    }

    let output = dir.path().join("out.csv");
    write_csv(&reports, &output)?;
    let written = std::fs::read_to_string(&output)?;
    assert_eq!(written.lines().count(), 12);
    assert!(written.lines().next().unwrap().starts_with("mode,start,end,epitope"));
    assert!(written.contains("A1;I2"));
    Ok(())
}

#[test]
fn missing_artifact_aborts_loading() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_model_dir(dir.path(), 3.)?;
    std::fs::remove_file(dir.path().join("hist_hla.json"))?;
    let err = match Pipeline::load(
        dir.path(),
        Path::new("/nonexistent/reference.csv"),
        PipelineParameters::default(),
    ) {
        Ok(_) => panic!("loading should fail"),
        Err(e) => e,
    };
    match err.downcast_ref::<EpitopeError>() {
        Some(EpitopeError::MissingModelArtifact { role, .. }) => assert_eq!(role, "hist_hla"),
        other => panic!("unexpected error {:?}", other),
    }
    Ok(())
}

#[test]
fn missing_catalog_gives_empty_matches() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_model_dir(dir.path(), 3.)?;
    let pipeline = Pipeline::load(
        dir.path(),
        Path::new("/nonexistent/reference.csv"),
        PipelineParameters::default(),
    )?;
    let reports = pipeline.predict("ACDEFGHIKL", Mode::Mhc1)?;
    assert!(reports[0].rows[0].is_valid());
    assert!(reports[0].rows[0].matched_hla().is_empty());
    Ok(())
}
