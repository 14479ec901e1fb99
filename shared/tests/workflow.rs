use async_trait::async_trait;
use calorie_shared::{
    AnalysisConfig, AnalysisError, AnalysisPipeline, CalorieEstimator, CalorieResult,
    DetectionResult, FileMeta, FoodDetector, InferenceError, MockCalorieEstimator,
    MockFoodDetector, NoDelay, UploadedImage, WorkflowController, WorkflowState,
};
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::join;
use image::{ImageFormat, Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::Cursor;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn png_upload(name: &str) -> UploadedImage {
    let img = RgbImage::from_pixel(8, 8, Rgb([10, 200, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    let bytes = out.into_inner();
    UploadedImage::new(&FileMeta::new(name, "image/png", bytes.len() as u64), bytes)
}

fn detection(contains_food: bool, confidence: f32, objects: &[&str]) -> DetectionResult {
    DetectionResult {
        contains_food,
        confidence,
        detected_objects: objects.iter().map(|s| s.to_string()).collect(),
    }
}

/// Replays queued detections, optionally holding each one until released.
#[derive(Default)]
struct ScriptedDetector {
    script: RefCell<VecDeque<(Option<oneshot::Receiver<()>>, DetectionResult)>>,
    calls: Cell<usize>,
}

impl ScriptedDetector {
    fn push(&self, detection: DetectionResult) {
        self.script.borrow_mut().push_back((None, detection));
    }

    fn push_gated(&self, detection: DetectionResult) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back((Some(rx), detection));
        tx
    }
}

#[async_trait(?Send)]
impl FoodDetector for ScriptedDetector {
    async fn detect(&self, _image: &UploadedImage) -> Result<DetectionResult, InferenceError> {
        self.calls.set(self.calls.get() + 1);
        let (gate, result) = self.script.borrow_mut().pop_front().ok_or_else(|| {
            InferenceError::Model {
                stage: "scripted-detector",
                reason: "script exhausted".into(),
            }
        })?;
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "scripted-detector"
    }
}

#[derive(Default)]
struct ScriptedEstimator {
    script: RefCell<VecDeque<CalorieResult>>,
}

impl ScriptedEstimator {
    fn push(&self, calories: u32, food: &str) {
        self.script
            .borrow_mut()
            .push_back(CalorieResult::new(calories, food));
    }
}

#[async_trait(?Send)]
impl CalorieEstimator for ScriptedEstimator {
    async fn estimate(&self, _image: &UploadedImage) -> Result<CalorieResult, InferenceError> {
        self.script
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| InferenceError::Model {
                stage: "scripted-estimator",
                reason: "script exhausted".into(),
            })
    }

    fn name(&self) -> &'static str {
        "scripted-estimator"
    }
}

type ScriptedPipeline = AnalysisPipeline<ScriptedDetector, ScriptedEstimator>;

fn scripted() -> ScriptedPipeline {
    AnalysisPipeline::new(ScriptedDetector::default(), ScriptedEstimator::default(), 0.7)
}

/// One full cycle the way the frontend drives it.
async fn analyze(
    controller: &RefCell<WorkflowController>,
    pipeline: &ScriptedPipeline,
    upload: &UploadedImage,
) -> bool {
    let cycle = match controller.borrow_mut().begin(&upload.meta()) {
        Ok(cycle) => cycle,
        Err(_) => return false,
    };
    let outcome = pipeline
        .run(upload, |preview| {
            controller.borrow_mut().show_preview(cycle, preview);
        })
        .await;
    controller.borrow_mut().finish(cycle, outcome)
}

#[test]
fn non_image_never_reaches_detector() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    let meta = FileMeta::new("report.pdf", "application/pdf", 3);
    let upload = UploadedImage::new(&meta, vec![1, 2, 3]);

    assert!(!block_on(analyze(&controller, &pipeline, &upload)));
    assert_eq!(pipeline.detector().calls.get(), 0);
    assert!(matches!(
        controller.borrow().state(),
        WorkflowState::Error(AnalysisError::InvalidFileType { .. })
    ));
}

#[test]
fn confident_detection_produces_merged_success() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    pipeline.detector().push(detection(true, 0.85, &["plate", "food"]));
    pipeline.estimator().push(450, "Rice");

    assert!(block_on(analyze(&controller, &pipeline, &png_upload("rice.png"))));

    let controller = controller.borrow();
    let result = controller.state().result().unwrap();
    assert_eq!(result.calories, 450);
    assert_eq!(result.detected_food, "Rice");
    assert_eq!(result.confidence, Some(0.85));
    assert_eq!(
        result.detected_objects,
        Some(vec!["plate".to_string(), "food".to_string()])
    );
    assert_eq!(controller.preview().map(|p| (p.width, p.height)), Some((8, 8)));
}

#[test]
fn no_food_error_lists_confidence_and_objects() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    pipeline.detector().push(detection(false, 0.314, &["desk", "paper", "person"]));

    assert!(block_on(analyze(&controller, &pipeline, &png_upload("desk.png"))));
    assert_eq!(
        controller.borrow().state().error().unwrap().to_string(),
        "No food detected in the image (Confidence: 31%). Detected objects: desk, paper, person"
    );
    assert!(!controller.borrow().is_analyzing());
}

#[test]
fn detector_fault_ends_cycle_with_generic_error() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    pipeline.estimator().push(450, "Rice");

    assert!(block_on(analyze(&controller, &pipeline, &png_upload("dark.png"))));

    let controller = controller.borrow();
    let err = controller.state().error().unwrap();
    assert!(matches!(err, AnalysisError::Unexpected { .. }));
    assert_eq!(
        err.to_string(),
        "An error occurred while analyzing the image. Please try again."
    );
    assert!(!controller.is_analyzing());
    assert_eq!(pipeline.detector().calls.get(), 1);
    assert_eq!(pipeline.estimator().script.borrow().len(), 1);
}

#[test]
fn second_upload_wins_over_slow_first_cycle() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    let release_first = pipeline
        .detector()
        .push_gated(detection(true, 0.9, &["plate"]));
    pipeline.detector().push(detection(false, 0.2, &["wall"]));
    pipeline.estimator().push(800, "Chicken");

    let first_upload = png_upload("first.png");
    let second_upload = png_upload("second.png");

    let first = analyze(&controller, &pipeline, &first_upload);
    let second = async {
        let applied = analyze(&controller, &pipeline, &second_upload).await;
        release_first.send(()).unwrap();
        applied
    };

    let (first_applied, second_applied) = block_on(join(first, second));

    assert!(!first_applied);
    assert!(second_applied);
    let controller = controller.borrow();
    match controller.state() {
        WorkflowState::Error(AnalysisError::NoFoodDetected { detected_objects, .. }) => {
            assert_eq!(detected_objects, &vec!["wall".to_string()]);
        }
        other => panic!("expected the second cycle's outcome, got {other:?}"),
    }
}

#[test]
fn sequential_reuploads_are_independent_cycles() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    pipeline.detector().push(detection(true, 0.8, &["plate"]));
    pipeline.detector().push(detection(true, 0.75, &["plate", "food"]));
    pipeline.estimator().push(610, "Vegetables");
    pipeline.estimator().push(220, "Rice");

    let upload = png_upload("same.png");

    assert!(block_on(analyze(&controller, &pipeline, &upload)));
    let first_cycle = controller.borrow().current_cycle();
    assert_eq!(controller.borrow().state().result().unwrap().calories, 610);

    assert!(block_on(analyze(&controller, &pipeline, &upload)));
    let second_cycle = controller.borrow().current_cycle();
    assert!(second_cycle > first_cycle);

    let controller = controller.borrow();
    let result = controller.state().result().unwrap();
    assert_eq!(result.calories, 220);
    assert_eq!(result.confidence, Some(0.75));
    assert_eq!(pipeline.detector().calls.get(), 2);
}

#[test]
fn confidence_at_threshold_never_succeeds() {
    init_logging();
    let controller = RefCell::new(WorkflowController::new(Default::default()));
    let pipeline = scripted();
    pipeline.detector().push(detection(true, 0.7, &["plate"]));
    pipeline.estimator().push(400, "Rice");

    assert!(block_on(analyze(&controller, &pipeline, &png_upload("edge.png"))));
    assert_eq!(
        controller.borrow().state(),
        &WorkflowState::Error(AnalysisError::LowConfidence { confidence: 0.7 })
    );
    assert_eq!(pipeline.estimator().script.borrow().len(), 1);
}

#[test]
fn mock_stages_only_succeed_above_threshold() {
    init_logging();
    let config = AnalysisConfig::default();
    let pipeline = AnalysisPipeline::new(
        MockFoodDetector::new(SmallRng::seed_from_u64(2024), config.detector.clone()),
        MockCalorieEstimator::new(SmallRng::seed_from_u64(99), NoDelay, config.estimator.clone()),
        config.acceptance_threshold,
    );
    let upload = png_upload("random.png");
    let mut successes = 0;

    for _ in 0..200 {
        let mut controller = WorkflowController::new(config.intake.clone());
        let cycle = controller.begin(&upload.meta()).unwrap();
        let outcome = block_on(pipeline.run(&upload, |_| {}));
        assert!(controller.finish(cycle, outcome));

        match controller.state() {
            WorkflowState::Success(result) => {
                successes += 1;
                assert!(result.confidence.unwrap() > 0.7);
                assert!((200..=999).contains(&result.calories));
            }
            WorkflowState::Error(AnalysisError::NoFoodDetected { confidence, .. }) => {
                assert!(*confidence <= 0.7);
            }
            other => panic!("unexpected terminal state {other:?}"),
        }
    }

    assert!(successes > 0);
}
