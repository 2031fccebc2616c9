use std::collections::HashMap;

use carapp::application::context::{ApplicationContext, CatalogStores};
use carapp::cache::CacheConfig;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

#[tokio::test]
async fn catalog_cache_emits_labelled_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let context = ApplicationContext::build(CatalogStores::in_memory(), &CacheConfig::default())
        .expect("complete wiring");
    let fuel = &context.catalogs.fuel;

    fuel.list().await.expect("first list loads");
    fuel.list().await.expect("second list hits");
    fuel.create("Electric").await.expect("create succeeds");
    fuel.list().await.expect("list reloads after write");

    let counters: HashMap<(String, Option<String>), u64> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite_key, _, _, value)| {
            let key = composite_key.key();
            let catalog = key
                .labels()
                .find(|label| label.key() == "catalog")
                .map(|label| label.value().to_string());
            match value {
                DebugValue::Counter(count) => Some(((key.name().to_string(), catalog), count)),
                _ => None,
            }
        })
        .collect();

    let fuel_label = Some("fuel".to_string());
    assert_eq!(
        counters.get(&("carapp_cache_miss_total".to_string(), fuel_label.clone())),
        Some(&2)
    );
    assert_eq!(
        counters.get(&("carapp_cache_hit_total".to_string(), fuel_label.clone())),
        Some(&1)
    );
    assert_eq!(
        counters.get(&("carapp_cache_invalidate_total".to_string(), fuel_label)),
        Some(&1)
    );
    assert!(
        !counters.contains_key(&("carapp_cache_miss_total".to_string(), Some("body".to_string()))),
        "untouched catalogs record nothing"
    );
}
