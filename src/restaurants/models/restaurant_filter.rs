use super::restaurant::Restaurant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantColumn {
    Id,
    UserId,
    DiscountCode,
}

impl RestaurantColumn {
    pub fn name(&self) -> &'static str {
        match *self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::DiscountCode => "discount_code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
}

impl Comparison {
    pub fn operator(&self) -> &'static str {
        match *self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: RestaurantColumn,
    pub comparison: Comparison,
    pub value: FilterValue,
}

/// Predicates over restaurant columns, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    predicates: Vec<Predicate>,
}

impl RestaurantFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, column: RestaurantColumn, value: impl Into<FilterValue>) -> Self {
        self.with(column, Comparison::Equal, value.into())
    }

    pub fn ne(self, column: RestaurantColumn, value: impl Into<FilterValue>) -> Self {
        self.with(column, Comparison::NotEqual, value.into())
    }

    fn with(mut self, column: RestaurantColumn, comparison: Comparison, value: FilterValue) -> Self {
        self.predicates.push(Predicate {
            column,
            comparison,
            value,
        });
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Values bind to `$1..$n` in predicate order.
    pub fn to_count_sql(&self) -> String {
        let mut sql = "SELECT COUNT(*) FROM restaurants".to_string();

        for (i, predicate) in self.predicates.iter().enumerate() {
            match i {
                0 => sql.push_str(" WHERE "),
                _ => sql.push_str(" AND "),
            }

            sql.push_str(
                &[
                    predicate.column.name(),
                    " ",
                    predicate.comparison.operator(),
                    " $",
                    &(i + 1).to_string(),
                ]
                .concat(),
            );
        }

        sql
    }

    /// A null column matches no predicate, as in SQL.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.predicates.iter().all(|predicate| {
            let actual = match predicate.column {
                RestaurantColumn::Id => Some(FilterValue::Int(restaurant.id)),
                RestaurantColumn::UserId => Some(FilterValue::Int(restaurant.user_id)),
                RestaurantColumn::DiscountCode => {
                    restaurant.discount_code.to_owned().map(FilterValue::Text)
                }
            };

            match (actual, predicate.comparison) {
                (None, _) => false,
                (Some(actual), Comparison::Equal) => actual == predicate.value,
                (Some(actual), Comparison::NotEqual) => actual != predicate.value,
            }
        })
    }
}
