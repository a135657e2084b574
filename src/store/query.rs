//! Record queries
//!
//! A [`Query`] carries the same knobs as the hosted backend's fetch call:
//! plain `where` conditions (all must hold), `where_groups` (OR/AND trees of
//! conditions), ordering and paging. Field values are compared as text,
//! case-insensitively.

use super::Record;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Field equals one of the values
    EqualTo,
    /// Field contains one of the values as a substring
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl Condition {
    pub fn equal_to(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        }
    }

    pub fn contains(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::Contains,
            values: vec![value.into()],
        }
    }

    /// A condition on a field the record does not have never matches.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let Some(actual) = record.field(&self.field) else {
            return false;
        };
        let actual = actual.to_lowercase();
        self.values.iter().any(|value| {
            let value = value.to_lowercase();
            match self.operator {
                Operator::EqualTo => actual == value,
                Operator::Contains => actual.contains(&value),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubGroup {
    pub operator: Combinator,
    pub conditions: Vec<Condition>,
}

/// Combines its sub-groups with `operator`. An empty group matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereGroup {
    pub operator: Combinator,
    pub sub_groups: Vec<SubGroup>,
}

impl WhereGroup {
    /// A group matching records where any of the conditions holds
    pub fn any_of(conditions: Vec<Condition>) -> Self {
        Self {
            operator: Combinator::Or,
            sub_groups: conditions
                .into_iter()
                .map(|condition| SubGroup {
                    operator: Combinator::Or,
                    conditions: vec![condition],
                })
                .collect(),
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        if self.sub_groups.is_empty() {
            return true;
        }
        let sub_matches = |group: &SubGroup| combine(group.operator, &group.conditions, record);
        match self.operator {
            Combinator::And => self.sub_groups.iter().all(sub_matches),
            Combinator::Or => self.sub_groups.iter().any(sub_matches),
        }
    }
}

fn combine<R: Record>(operator: Combinator, conditions: &[Condition], record: &R) -> bool {
    if conditions.is_empty() {
        return true;
    }
    match operator {
        Combinator::And => conditions.iter().all(|c| c.matches(record)),
        Combinator::Or => conditions.iter().any(|c| c.matches(record)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub conditions: Vec<Condition>,
    pub where_groups: Vec<WhereGroup>,
    pub order_by: Vec<OrderBy>,
    pub paging: Option<Paging>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn group(mut self, group: WhereGroup) -> Self {
        self.where_groups.push(group);
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.paging = Some(Paging { limit, offset });
        self
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
            && self.where_groups.iter().all(|g| g.matches(record))
    }

    /// Filter, order and page `records`. Ordering is stable, so records that
    /// compare equal on every key keep their input order.
    pub fn apply<R: Record>(&self, records: impl IntoIterator<Item = R>) -> Vec<R> {
        let mut selected: Vec<R> = records.into_iter().filter(|r| self.matches(r)).collect();

        if !self.order_by.is_empty() {
            selected.sort_by(|a, b| self.compare(a, b));
        }

        match self.paging {
            Some(Paging { limit, offset }) => selected.into_iter().skip(offset).take(limit).collect(),
            None => selected,
        }
    }

    fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        for order in &self.order_by {
            let left = a.field(&order.field).map(|v| v.to_lowercase());
            let right = b.field(&order.field).map(|v| v.to_lowercase());
            let ordering = match order.direction {
                SortDirection::Ascending => left.cmp(&right),
                SortDirection::Descending => right.cmp(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    fn user(id: u64, name: &str, phone: Option<&str>) -> User {
        User {
            id,
            name: name.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    fn users() -> Vec<User> {
        vec![
            user(1, "carol@example.com", Some("+15550003")),
            user(2, "alice@example.com", None),
            user(3, "Bob@example.com", Some("+15550002")),
        ]
    }

    fn ids(records: &[User]) -> Vec<u64> {
        records.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let result = Query::new().apply(users());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_to_is_case_insensitive() {
        let query = Query::new().filter(Condition::equal_to("name", "BOB@EXAMPLE.COM"));
        assert_eq!(ids(&query.apply(users())), vec![3]);
    }

    #[test]
    fn test_contains_condition() {
        let query = Query::new().filter(Condition::contains("name", "AL"));
        assert_eq!(ids(&query.apply(users())), vec![2]);
    }

    #[test]
    fn test_missing_field_never_matches() {
        let query = Query::new().filter(Condition::contains("phone", "555"));
        assert_eq!(ids(&query.apply(users())), vec![1, 3]);

        let query = Query::new().filter(Condition::equal_to("nickname", "bob"));
        assert!(query.apply(users()).is_empty());
    }

    #[test]
    fn test_any_of_group() {
        let query = Query::new().group(WhereGroup::any_of(vec![
            Condition::contains("name", "carol"),
            Condition::contains("phone", "0002"),
        ]));
        assert_eq!(ids(&query.apply(users())), vec![1, 3]);
    }

    #[test]
    fn test_and_group_requires_every_sub_group() {
        let group = WhereGroup {
            operator: Combinator::And,
            sub_groups: vec![
                SubGroup {
                    operator: Combinator::Or,
                    conditions: vec![Condition::contains("name", "example")],
                },
                SubGroup {
                    operator: Combinator::Or,
                    conditions: vec![Condition::contains("phone", "0003")],
                },
            ],
        };
        assert_eq!(ids(&Query::new().group(group).apply(users())), vec![1]);
    }

    #[test]
    fn test_order_by_ascending_ignores_case() {
        let query = Query::new().order_by("name", SortDirection::Ascending);
        assert_eq!(ids(&query.apply(users())), vec![2, 3, 1]);
    }

    #[test]
    fn test_order_by_descending() {
        let query = Query::new().order_by("name", SortDirection::Descending);
        assert_eq!(ids(&query.apply(users())), vec![1, 3, 2]);
    }

    #[test]
    fn test_paging_after_ordering() {
        let query = Query::new()
            .order_by("name", SortDirection::Ascending)
            .page(1, 1);
        assert_eq!(ids(&query.apply(users())), vec![3]);

        let query = Query::new().page(10, 5);
        assert!(query.apply(users()).is_empty());
    }
}
