use contracts::dashboards::d413_cross_channel::{CrossChannelResponse, MessageTypeRow};
use contracts::enums::AdChannel;

use crate::shared::data::dataset::ReportDataset;
use crate::shared::metrics::{cost_status, cpl, cpl_sort_key};

/// Message types compared across channels, cheapest first
pub fn get_cross_channel(dataset: &ReportDataset) -> CrossChannelResponse {
    let total_spend: f64 = dataset.channels.iter().map(|c| c.spend).sum();
    let total_conversions: f64 = dataset.channels.iter().map(|c| c.conversions).sum();
    let blended_cpl = cpl(total_spend, total_conversions);

    let mut messages: Vec<MessageTypeRow> = dataset
        .message_types
        .iter()
        .map(|m| {
            let by_channel = [
                (AdChannel::Google, m.google_cpl),
                (AdChannel::Meta, m.meta_cpl),
            ];
            let channels = by_channel
                .iter()
                .filter(|(_, c)| c.is_some())
                .map(|(channel, _)| *channel)
                .collect();
            let best = by_channel
                .iter()
                .filter_map(|(channel, c)| c.map(|c| (*channel, c)))
                .min_by(|a, b| a.1.total_cmp(&b.1));

            MessageTypeRow {
                id: m.id.clone(),
                label: m.label.clone(),
                google_cpl: m.google_cpl,
                meta_cpl: m.meta_cpl,
                channels,
                best_channel: best.map(|(channel, _)| channel),
                best_cpl: best.map(|(_, c)| c),
                status: cost_status(best.map(|(_, c)| c), blended_cpl),
            }
        })
        .collect();
    messages.sort_by(|a, b| cpl_sort_key(a.best_cpl).total_cmp(&cpl_sort_key(b.best_cpl)));

    CrossChannelResponse {
        blended_cpl,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::test_dataset;
    use contracts::shared::indicators::IndicatorStatus;

    #[test]
    fn test_messages_sorted_by_best_cpl() {
        let response = get_cross_channel(test_dataset());
        let ids: Vec<&str> = response.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "price",
                "brand",
                "community",
                "emotional",
                "small_move",
                "general_move",
                "freight"
            ]
        );
    }

    #[test]
    fn test_best_channel_is_cheaper_one() {
        let response = get_cross_channel(test_dataset());
        let price = &response.messages[0];
        assert_eq!(price.channels, vec![AdChannel::Google, AdChannel::Meta]);
        assert_eq!(price.best_channel, Some(AdChannel::Meta));
        assert_eq!(price.best_cpl, Some(3_850.0));
        assert_eq!(price.status, IndicatorStatus::Good);

        let freight = response.messages.last().unwrap();
        assert_eq!(freight.channels, vec![AdChannel::Google]);
        assert_eq!(freight.status, IndicatorStatus::Bad);
    }

    #[test]
    fn test_message_without_cpl() {
        let mut dataset = test_dataset().clone();
        dataset.message_types[0].google_cpl = None;
        dataset.message_types[0].meta_cpl = None;
        let response = get_cross_channel(&dataset);
        let untracked = response.messages.last().unwrap();
        assert_eq!(untracked.id, "price");
        assert!(untracked.channels.is_empty());
        assert_eq!(untracked.best_channel, None);
        assert_eq!(untracked.status, IndicatorStatus::Neutral);
    }
}
