use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn ads_total_spend() -> IndicatorId {
        IndicatorId::new("ads_total_spend")
    }
    pub fn ads_total_conversions() -> IndicatorId {
        IndicatorId::new("ads_total_conversions")
    }
    pub fn ads_blended_cpl() -> IndicatorId {
        IndicatorId::new("ads_blended_cpl")
    }
    pub fn google_cpl() -> IndicatorId {
        IndicatorId::new("google_cpl")
    }
    pub fn meta_cpl() -> IndicatorId {
        IndicatorId::new("meta_cpl")
    }
    pub fn meta_cpl_trend() -> IndicatorId {
        IndicatorId::new("meta_cpl_trend")
    }
}

/// Indicators shown on the channel overview page, in display order
pub fn overview_set() -> Vec<IndicatorId> {
    vec![
        ids::ads_total_spend(),
        ids::ads_total_conversions(),
        ids::ads_blended_cpl(),
        ids::google_cpl(),
        ids::meta_cpl(),
    ]
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog(currency: &str) -> IndicatorCatalogResponse {
    let money = || ValueFormat::Money {
        currency: currency.to_string(),
    };

    let indicators = vec![
        IndicatorMeta {
            id: ids::ads_total_spend(),
            label: "Total ad spend".into(),
            short_label: Some("Spend".into()),
            format: money(),
            lower_is_better: false,
            description: Some("Platform-reported spend over the report period".into()),
        },
        IndicatorMeta {
            id: ids::ads_total_conversions(),
            label: "Conversions".into(),
            short_label: None,
            format: ValueFormat::Integer,
            lower_is_better: false,
            description: Some("Platform-attributed conversions (leads)".into()),
        },
        IndicatorMeta {
            id: ids::ads_blended_cpl(),
            label: "Blended CPL".into(),
            short_label: Some("CPL".into()),
            format: money(),
            lower_is_better: true,
            description: Some("Spend / conversions across the selected channels".into()),
        },
        IndicatorMeta {
            id: ids::google_cpl(),
            label: "Google CPL".into(),
            short_label: None,
            format: money(),
            lower_is_better: true,
            description: None,
        },
        IndicatorMeta {
            id: ids::meta_cpl(),
            label: "Meta CPL".into(),
            short_label: None,
            format: money(),
            lower_is_better: true,
            description: None,
        },
        IndicatorMeta {
            id: ids::meta_cpl_trend(),
            label: "Meta CPL trend".into(),
            short_label: Some("Trend".into()),
            format: ValueFormat::Percent { decimals: 1 },
            lower_is_better: true,
            description: Some("Monthly Meta CPL, first vs last month of the period".into()),
        },
    ];

    let sets = vec![
        IndicatorSetMeta {
            id: IndicatorSetId::new("channel_overview"),
            label: "Channel overview".into(),
            indicators: overview_set(),
        },
        IndicatorSetMeta {
            id: IndicatorSetId::new("meta_health"),
            label: "Meta health".into(),
            indicators: vec![ids::meta_cpl(), ids::meta_cpl_trend()],
        },
    ];

    IndicatorCatalogResponse { indicators, sets }
}
