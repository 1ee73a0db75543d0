use subdesk_types::models::{GroupRecord, SubscriptionStatus};

/// The three disjoint views of one fetched group snapshot.
///
/// Buckets hold owned copies: a snapshot is replaced wholesale on every
/// fetch, so nothing may borrow from the previous one. Within each bucket
/// the records keep the relative order the backend sent them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBuckets {
    pub subscribed: Vec<GroupRecord>,
    pub unsubscribed: Vec<GroupRecord>,
    pub pending: Vec<GroupRecord>,
}

impl StatusBuckets {
    /// Total records across all three buckets.
    pub fn len(&self) -> usize {
        self.subscribed.len() + self.unsubscribed.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bucket for one status.
    pub fn for_status(&self, status: SubscriptionStatus) -> &[GroupRecord] {
        match status {
            SubscriptionStatus::Subscribed => &self.subscribed,
            SubscriptionStatus::Unsubscribed => &self.unsubscribed,
            SubscriptionStatus::Pending => &self.pending,
        }
    }
}

/// Split a snapshot into its status buckets.
///
/// Single pass, order preserving, no record duplicated or dropped: status
/// is a total, exclusive tag, so the buckets' concatenation is always a
/// permutation of the input. Empty input yields three empty buckets.
pub fn partition(groups: &[GroupRecord]) -> StatusBuckets {
    let mut buckets = StatusBuckets::default();
    for group in groups {
        let bucket = match group.status {
            SubscriptionStatus::Subscribed => &mut buckets.subscribed,
            SubscriptionStatus::Unsubscribed => &mut buckets.unsubscribed,
            SubscriptionStatus::Pending => &mut buckets.pending,
        };
        bucket.push(group.clone());
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, name: &str, desc: &str, status: SubscriptionStatus) -> GroupRecord {
        GroupRecord {
            id: id.into(),
            group_name: name.into(),
            description: desc.into(),
            status,
        }
    }

    fn sample() -> Vec<GroupRecord> {
        vec![
            group("1", "Finance", "Finance data", SubscriptionStatus::Unsubscribed),
            group("2", "Ops", "Ops data", SubscriptionStatus::Subscribed),
            group("3", "Compliance_Data", "Audit trail", SubscriptionStatus::Pending),
            group("4", "Risk", "Risk models", SubscriptionStatus::Unsubscribed),
            group("5", "Treasury", "Cash positions", SubscriptionStatus::Subscribed),
        ]
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let buckets = partition(&[]);
        assert!(buckets.is_empty());
        assert_eq!(buckets, StatusBuckets::default());
    }

    #[test]
    fn finance_ops_scenario() {
        let groups = vec![
            group("1", "Finance", "Finance data", SubscriptionStatus::Unsubscribed),
            group("2", "Ops", "Ops data", SubscriptionStatus::Subscribed),
        ];
        let buckets = partition(&groups);
        assert_eq!(buckets.subscribed.len(), 1);
        assert_eq!(buckets.subscribed[0].group_name, "Ops");
        assert_eq!(buckets.unsubscribed.len(), 1);
        assert_eq!(buckets.unsubscribed[0].group_name, "Finance");
        assert!(buckets.pending.is_empty());
    }

    #[test]
    fn concatenation_is_a_permutation_of_the_input() {
        let groups = sample();
        let buckets = partition(&groups);
        assert_eq!(buckets.len(), groups.len());

        let mut seen: Vec<&str> = buckets
            .subscribed
            .iter()
            .chain(&buckets.unsubscribed)
            .chain(&buckets.pending)
            .map(|g| g.id.as_str())
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn buckets_are_pairwise_disjoint_and_pure() {
        let buckets = partition(&sample());
        for g in &buckets.subscribed {
            assert_eq!(g.status, SubscriptionStatus::Subscribed);
        }
        for g in &buckets.unsubscribed {
            assert_eq!(g.status, SubscriptionStatus::Unsubscribed);
        }
        for g in &buckets.pending {
            assert_eq!(g.status, SubscriptionStatus::Pending);
        }
    }

    #[test]
    fn relative_order_is_preserved_per_bucket() {
        let buckets = partition(&sample());
        let unsub: Vec<&str> = buckets.unsubscribed.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(unsub, ["1", "4"]);
        let sub: Vec<&str> = buckets.subscribed.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(sub, ["2", "5"]);
    }

    #[test]
    fn repartition_of_concatenated_buckets_is_idempotent() {
        let first = partition(&sample());
        let mut concatenated = Vec::new();
        concatenated.extend(first.subscribed.iter().cloned());
        concatenated.extend(first.unsubscribed.iter().cloned());
        concatenated.extend(first.pending.iter().cloned());

        let second = partition(&concatenated);
        assert_eq!(second, first);
    }
}
