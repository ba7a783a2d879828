use super::domain::{BonusClassifier, BonusDefinition, BonusTaxonomy};
use crate::log_debug;
use crate::modules::listing::domain::{extract_plus_level, UpgradeBucket};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use tauri::State;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ClassifyBonusRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ClassifyBonusResponse {
    pub is_max_roll: bool,
    pub matched: Vec<BonusDefinition>,
    pub numbers: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct UpgradeBucketRequest {
    pub item_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct UpgradeBucketResponse {
    pub level: Option<u32>,
    pub bucket: UpgradeBucket,
    pub label: String,
}

#[tauri::command]
#[specta::specta]
pub async fn classify_bonus_text(
    request: ClassifyBonusRequest,
    taxonomy: State<'_, Arc<BonusTaxonomy>>,
) -> Result<ClassifyBonusResponse, String> {
    let classifier = BonusClassifier::new(&taxonomy);
    let matched: Vec<BonusDefinition> = classifier
        .matching_definitions(&request.text)
        .into_iter()
        .cloned()
        .collect();

    let response = ClassifyBonusResponse {
        is_max_roll: classifier.classify(&request.text),
        numbers: if matched.is_empty() {
            Vec::new()
        } else {
            BonusClassifier::extract_numbers(&request.text)
        },
        matched,
    };
    log_debug!(
        "classify_bonus_text '{}' -> {}",
        request.text,
        response.is_max_roll
    );
    Ok(response)
}

#[tauri::command]
#[specta::specta]
pub async fn get_bonus_taxonomy(
    taxonomy: State<'_, Arc<BonusTaxonomy>>,
) -> Result<Vec<BonusDefinition>, String> {
    Ok(taxonomy.definitions().cloned().collect())
}

#[tauri::command]
#[specta::specta]
pub async fn get_upgrade_bucket(
    request: UpgradeBucketRequest,
) -> Result<UpgradeBucketResponse, String> {
    let level = extract_plus_level(&request.item_name);
    let bucket = UpgradeBucket::from_level(level);
    Ok(UpgradeBucketResponse {
        level,
        bucket,
        label: bucket.label().to_string(),
    })
}
