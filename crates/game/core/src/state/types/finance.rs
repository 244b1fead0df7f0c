use super::common::Money;

/// Accounting bucket a cost is booked against.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumCount, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExpenditureType {
    RideConstruction,
    RideRunningCosts,
    LandPurchase,
    Landscaping,
    ParkEntranceTickets,
    ParkRideTickets,
    ShopSales,
    ShopStock,
    FoodDrinkSales,
    FoodDrinkStock,
    Wages,
    Marketing,
    Research,
    Interest,
}

/// Park cash and running totals per expenditure bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finance {
    pub cash: Money,
    expenditure: Vec<Money>,
}

impl Finance {
    pub fn new(cash: Money) -> Self {
        Self {
            cash,
            expenditure: Vec::new(),
        }
    }

    /// True when `cost` can be paid from the current balance. Refunds always can.
    pub fn can_afford(&self, cost: Money) -> bool {
        cost <= Money::ZERO || self.cash >= cost
    }

    /// Deducts `cost` from cash and books it against `kind`.
    pub fn pay(&mut self, cost: Money, kind: ExpenditureType) {
        use strum::EnumCount;

        if self.expenditure.len() < ExpenditureType::COUNT {
            self.expenditure.resize(ExpenditureType::COUNT, Money::ZERO);
        }
        self.cash -= cost;
        self.expenditure[kind as usize] += cost;
    }

    /// Total booked against `kind` so far.
    pub fn spent(&self, kind: ExpenditureType) -> Money {
        self.expenditure
            .get(kind as usize)
            .copied()
            .unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refunds_raise_cash_and_book_negative_expenditure() {
        let mut finance = Finance::new(Money(1_000));
        finance.pay(Money(-75), ExpenditureType::Landscaping);

        assert_eq!(finance.cash, Money(1_075));
        assert_eq!(finance.spent(ExpenditureType::Landscaping), Money(-75));
        assert_eq!(finance.spent(ExpenditureType::Wages), Money::ZERO);
    }

    #[test]
    fn affordability() {
        let finance = Finance::new(Money(50));
        assert!(finance.can_afford(Money(50)));
        assert!(!finance.can_afford(Money(51)));
        assert!(finance.can_afford(Money(-500)));
    }
}
