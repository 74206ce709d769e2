use anyhow::Result;
use provax::models::{
    Aggregation, DecisionTree, ModelArtifact, ModelManifest, ModelRecord, TreeEnsemble,
    MANIFEST_FILE,
};
use provax::{ModelRole, ModelSet, Predictor};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[allow(dead_code)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.0)
    }
}

/// Constant output, counts the calls
#[allow(dead_code)]
pub struct CountingPredictor {
    pub value: f64,
    pub calls: Arc<AtomicUsize>,
}

impl Predictor for CountingPredictor {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value)
    }
}

#[allow(dead_code)]
pub struct FnPredictor<F>(pub F);

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn predict(&self, features: &[f64]) -> Result<f64> {
        Ok((self.0)(features))
    }
}

#[allow(dead_code)]
pub fn fn_predictor<F>(f: F) -> Box<dyn Predictor>
where
    F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
{
    Box::new(FnPredictor(f))
}

/// Declares an input size but otherwise constant
#[allow(dead_code)]
pub struct SizedPredictor(pub usize);

impl Predictor for SizedPredictor {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(0.)
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.0)
    }

    fn name(&self) -> String {
        format!("sized({})", self.0)
    }
}

#[allow(dead_code)]
pub fn stub_models(
    labels: [f64; 3],
    scores: (f64, f64),
    affinity: (f64, f64, f64),
) -> Result<ModelSet> {
    let values = [
        (ModelRole::BaggingTarget, labels[0]),
        (ModelRole::ExtraTreeTarget, labels[1]),
        (ModelRole::RandomForestTarget, labels[2]),
        (ModelRole::XgbScore, scores.0),
        (ModelRole::LgbmScore, scores.1),
        (ModelRole::ExtraTreeHla, affinity.0),
        (ModelRole::LgbmHla, affinity.1),
        (ModelRole::HistHla, affinity.2),
    ];
    ModelSet::from_predictors(
        values
            .into_iter()
            .map(|(role, v)| (role, Box::new(ConstantPredictor(v)) as Box<dyn Predictor>)),
    )
}

/// Every predictor returns 1 and counts its calls
#[allow(dead_code)]
pub fn counting_models() -> Result<(ModelSet, HashMap<ModelRole, Arc<AtomicUsize>>)> {
    let counters: HashMap<ModelRole, Arc<AtomicUsize>> = ModelRole::ALL
        .iter()
        .map(|&r| (r, Arc::new(AtomicUsize::new(0))))
        .collect();
    let models = ModelSet::from_predictors(ModelRole::ALL.iter().map(|&r| {
        (
            r,
            Box::new(CountingPredictor {
                value: 1.,
                calls: counters[&r].clone(),
            }) as Box<dyn Predictor>,
        )
    }))?;
    Ok((models, counters))
}

#[allow(dead_code)]
pub fn calls(counters: &HashMap<ModelRole, Arc<AtomicUsize>>, role: ModelRole) -> usize {
    counters[&role].load(Ordering::SeqCst)
}

/// Replace one role of an otherwise constant model set
#[allow(dead_code)]
pub fn models_with(role: ModelRole, predictor: Box<dyn Predictor>) -> Result<ModelSet> {
    let mut predictors: Vec<(ModelRole, Box<dyn Predictor>)> = ModelRole::ALL
        .iter()
        .filter(|&&r| r != role)
        .map(|&r| (r, Box::new(ConstantPredictor(1.)) as Box<dyn Predictor>))
        .collect();
    predictors.push((role, predictor));
    ModelSet::from_predictors(predictors)
}

#[allow(dead_code)]
fn n_inputs(role: ModelRole) -> usize {
    match role {
        ModelRole::BaggingTarget | ModelRole::ExtraTreeTarget | ModelRole::RandomForestTarget => 35,
        ModelRole::XgbScore | ModelRole::LgbmScore => 63,
        ModelRole::ExtraTreeHla | ModelRole::LgbmHla | ModelRole::HistHla => 43,
    }
}

/// Small json artifacts: positive classifiers, scores decreasing with the
/// window start, constant affinities.
#[allow(dead_code)]
pub fn artifact(role: ModelRole, affinity: f64) -> Result<ModelArtifact> {
    let estimator = match role {
        ModelRole::BaggingTarget | ModelRole::ExtraTreeTarget | ModelRole::RandomForestTarget => {
            TreeEnsemble {
                trees: vec![DecisionTree::constant(1.), DecisionTree::constant(0.9)],
                aggregation: Aggregation::Vote,
                base_score: 0.,
            }
        }
        ModelRole::XgbScore | ModelRole::LgbmScore => TreeEnsemble {
            // feature 0 is the window start
            trees: vec![DecisionTree::stump(0, 2.5, 0.5, -0.5)],
            aggregation: Aggregation::Sum,
            base_score: 1.,
        },
        ModelRole::ExtraTreeHla | ModelRole::LgbmHla | ModelRole::HistHla => TreeEnsemble {
            trees: vec![DecisionTree::constant(affinity)],
            aggregation: Aggregation::Mean,
            base_score: 0.,
        },
    };
    ModelArtifact::new(role.as_str(), "1.0", n_inputs(role), estimator.into())
}

/// Write a complete model directory (manifest and one file per role).
#[allow(dead_code)]
pub fn write_model_dir(dir: &Path, affinity: f64) -> Result<()> {
    let mut manifest = ModelManifest::default();
    for role in ModelRole::ALL {
        let file = format!("{}.json", role);
        artifact(role, affinity)?.save_json(&dir.join(&file))?;
        manifest.models.push(ModelRecord {
            role,
            file,
            version: "1.0".to_string(),
            description: String::new(),
        });
    }
    serde_json::to_writer_pretty(File::create(dir.join(MANIFEST_FILE))?, &manifest)?;
    Ok(())
}
