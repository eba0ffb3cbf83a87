#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end runs of the grow wizard against the in-memory station.

use std::sync::Arc;

use fs_console_core::{
    grow_available, AlertSeverity, FinishOutcome, InMemoryMessageCatalog, RenderTarget, StepId,
    StepInput, SubmitOutcome, WizardContext, WizardEngine,
};
use fs_console_model::{
    AllocatableUnit, FileSystemInfo, InMemorySystemModel, ServerSeed, SystemModel,
};

const SERVER: &str = "stor-01";

fn slices(paths: &[&str]) -> Vec<AllocatableUnit> {
    paths.iter().map(|p| AllocatableUnit::slice(*p, 500_000_000_000)).collect()
}

async fn seeded_model(seed: ServerSeed) -> InMemorySystemModel {
    let model = InMemorySystemModel::new();
    model.add_server(SERVER, seed).await;
    model
}

fn console_catalog() -> InMemoryMessageCatalog {
    InMemoryMessageCatalog::with_entries([
        ("FSSummary.growfs", "File System {0} was grown successfully."),
        ("FSWizard.grow.error.numStripedGroup", "Too many new striped groups."),
    ])
}

fn context(model: &InMemorySystemModel) -> Arc<WizardContext> {
    Arc::new(WizardContext::new(Arc::new(model.clone()), Arc::new(console_catalog())))
}

fn base_fs(name: &str) -> FileSystemInfo {
    FileSystemInfo {
        name: name.into(),
        separate_metadata: false,
        mounted: false,
        shared: false,
        ha: false,
        striped_group_count: None,
        data_device_count: 2,
        metadata_device_count: 0,
    }
}

fn devices(paths: &[&str]) -> StepInput {
    StepInput::Devices { selected: paths.iter().map(ToString::to_string).collect() }
}

async fn advance(engine: &mut WizardEngine, input: &StepInput) {
    let step = engine.current_step();
    engine.enter().await.expect("enter failed");
    let outcome = engine.submit(input).await.expect("submit failed");
    assert_eq!(outcome, SubmitOutcome::Advance, "wizard stayed on {step}");
}

// ===== Happy Paths =====

#[tokio::test]
async fn growing_a_striped_file_system_walks_the_group_pages() {
    let model = seeded_model(ServerSeed {
        api_version: Some("1.6.2".into()),
        units: slices(&["/dev/dsk/c5t0d0s0", "/dev/dsk/c5t1d0s0", "/dev/dsk/c5t2d0s0"]),
        ..ServerSeed::default()
    })
    .await;
    let mut info = base_fs("samfs1");
    info.separate_metadata = true;
    info.striped_group_count = Some(2);
    info.data_device_count = 4;
    info.metadata_device_count = 1;
    model.add_file_system(SERVER, info).await.unwrap();

    let mut engine = WizardEngine::start_grow(context(&model), SERVER, "samfs1").await;

    let session = engine.session();
    assert_eq!(session.fs_name.as_deref(), Some("samfs1"));
    assert_eq!(session.existing_striped_groups, Some(2));
    assert_eq!(session.available_striped_groups, Some(126));
    assert_eq!(session.available_devices, Some(247));

    assert_eq!(engine.current_step(), StepId::MetadataDevices);
    advance(&mut engine, &devices(&["/dev/dsk/c5t0d0s0"])).await;

    assert_eq!(engine.current_step(), StepId::StripedGroupCount);
    advance(&mut engine, &StepInput::StripedGroupCount { count: "1".into() }).await;

    assert_eq!(engine.current_step(), StepId::StripedGroup(0));
    advance(&mut engine, &devices(&["/dev/dsk/c5t1d0s0", "/dev/dsk/c5t2d0s0"])).await;
    advance(&mut engine, &StepInput::Summary).await;
    assert_eq!(engine.current_step(), StepId::Result);

    let finish = engine.session().finish.clone().unwrap();
    assert_eq!(finish.outcome, FinishOutcome::Success);
    assert_eq!(finish.detail, "File System samfs1 was grown successfully.");

    let info = model.get_file_system(SERVER, "samfs1").await.unwrap();
    assert_eq!(info.striped_group_count, Some(3));
    assert_eq!(info.data_device_count, 6);
    assert_eq!(info.metadata_device_count, 2);
}

#[tokio::test]
async fn zero_new_groups_goes_straight_to_the_summary() {
    let model = seeded_model(ServerSeed {
        units: slices(&["/dev/dsk/c6t0d0s0"]),
        ..ServerSeed::default()
    })
    .await;
    let mut info = base_fs("samfs2");
    info.striped_group_count = Some(2);
    info.data_device_count = 4;
    model.add_file_system(SERVER, info).await.unwrap();

    let mut engine = WizardEngine::start_grow(context(&model), SERVER, "samfs2").await;

    assert_eq!(engine.current_step(), StepId::StripedGroupCount);
    advance(&mut engine, &StepInput::StripedGroupCount { count: "0".into() }).await;
    assert_eq!(engine.current_step(), StepId::Summary);
    advance(&mut engine, &StepInput::Summary).await;

    assert_eq!(engine.session().finish.as_ref().unwrap().outcome, FinishOutcome::Success);
    let info = model.get_file_system(SERVER, "samfs2").await.unwrap();
    assert_eq!(info.striped_group_count, Some(2));
    assert_eq!(info.data_device_count, 4);
}

#[tokio::test]
async fn a_plain_file_system_grows_by_data_devices() {
    let model = seeded_model(ServerSeed {
        units: slices(&["/dev/dsk/c7t0d0s0", "/dev/dsk/c7t1d0s0"]),
        ..ServerSeed::default()
    })
    .await;
    model.add_file_system(SERVER, base_fs("samfs3")).await.unwrap();

    let mut engine = WizardEngine::start_grow(context(&model), SERVER, "samfs3").await;

    assert_eq!(engine.current_step(), StepId::DataDevices);
    assert_eq!(engine.step_sequence(), vec![StepId::DataDevices, StepId::Summary, StepId::Result]);

    advance(&mut engine, &devices(&["/dev/dsk/c7t0d0s0", "/dev/dsk/c7t1d0s0"])).await;
    advance(&mut engine, &StepInput::Summary).await;

    let info = model.get_file_system(SERVER, "samfs3").await.unwrap();
    assert_eq!(info.data_device_count, 4);
    assert_eq!(info.striped_group_count, None);
}

#[tokio::test]
async fn the_metadata_page_appears_only_for_separate_metadata() {
    let model = seeded_model(ServerSeed::default()).await;
    let mut separate = base_fs("meta1");
    separate.separate_metadata = true;
    separate.metadata_device_count = 1;
    model.add_file_system(SERVER, separate).await.unwrap();
    model.add_file_system(SERVER, base_fs("plain1")).await.unwrap();

    let engine = WizardEngine::start_grow(context(&model), SERVER, "meta1").await;
    assert_eq!(engine.current_step(), StepId::MetadataDevices);

    let engine = WizardEngine::start_grow(context(&model), SERVER, "plain1").await;
    assert_eq!(engine.current_step(), StepId::DataDevices);
}

// ===== Budgets =====

#[tokio::test]
async fn group_counts_above_the_budget_are_rejected() {
    let model = seeded_model(ServerSeed::default()).await;
    let mut info = base_fs("samfs4");
    info.striped_group_count = Some(127);
    model.add_file_system(SERVER, info).await.unwrap();

    let mut engine = WizardEngine::start_grow(context(&model), SERVER, "samfs4").await;

    assert_eq!(engine.session().available_striped_groups, Some(1));
    assert_eq!(engine.current_step(), StepId::StripedGroupCount);
    engine.enter().await.unwrap();
    assert_eq!(
        engine.submit(&StepInput::StripedGroupCount { count: "2".into() }).await.unwrap(),
        SubmitOutcome::Stay
    );

    let render = engine.enter().await.unwrap();
    let alert = render.alert.unwrap();
    assert_eq!(alert.severity, AlertSeverity::Error);
    assert_eq!(alert.summary, "Too many new striped groups.");
    assert_eq!(alert.detail, "1");

    assert_eq!(
        engine.submit(&StepInput::StripedGroupCount { count: "1".into() }).await.unwrap(),
        SubmitOutcome::Advance
    );
}

#[tokio::test]
async fn the_device_budget_counts_what_the_file_system_already_uses() {
    let model = seeded_model(ServerSeed {
        units: slices(&["/dev/dsk/c8t0d0s0", "/dev/dsk/c8t1d0s0"]),
        ..ServerSeed::default()
    })
    .await;
    let mut info = base_fs("samfs5");
    info.data_device_count = 250;
    info.metadata_device_count = 1;
    model.add_file_system(SERVER, info).await.unwrap();

    let mut engine = WizardEngine::start_grow(context(&model), SERVER, "samfs5").await;

    assert_eq!(engine.session().available_devices, Some(1));
    engine.enter().await.unwrap();
    assert_eq!(
        engine.submit(&devices(&["/dev/dsk/c8t0d0s0", "/dev/dsk/c8t1d0s0"])).await.unwrap(),
        SubmitOutcome::Stay
    );

    let render = engine.enter().await.unwrap();
    assert_eq!(render.alert.unwrap().summary, "FSWizard.maxlun");

    assert_eq!(
        engine.submit(&devices(&["/dev/dsk/c8t0d0s0"])).await.unwrap(),
        SubmitOutcome::Advance
    );
}

// ===== Failure Handling =====

#[tokio::test]
async fn a_seeding_failure_is_rendered_on_the_first_page() {
    let model = seeded_model(ServerSeed {
        units: slices(&["/dev/dsk/c9t0d0s0"]),
        ..ServerSeed::default()
    })
    .await;

    let mut engine = WizardEngine::start_grow(context(&model), SERVER, "ghost").await;

    assert_eq!(engine.session().fs_name.as_deref(), Some("ghost"));
    assert_eq!(engine.current_step(), StepId::DataDevices);

    let render = engine.enter().await.unwrap();
    assert_eq!(render.target, RenderTarget::ErrorPagelet);
    let alert = render.alert.unwrap();
    assert_eq!(alert.severity, AlertSeverity::Error);
    assert_eq!(alert.summary, "FSWizard.error.carryover");
    assert!(alert.detail.contains("ghost"));
}

// ===== Gating =====

#[tokio::test]
async fn grow_gating_follows_the_server_version() {
    let model = seeded_model(ServerSeed::default()).await;
    let mut info = base_fs("samfs6");
    info.mounted = true;
    model.add_file_system(SERVER, info).await.unwrap();

    let info = model.get_file_system(SERVER, "samfs6").await.unwrap();
    assert!(grow_available(Some("1.6.2"), &info));
    assert!(!grow_available(Some("1.5"), &info));

    let mut ha = base_fs("hafs1");
    ha.ha = true;
    assert!(!grow_available(Some("1.6.2"), &ha));
}
