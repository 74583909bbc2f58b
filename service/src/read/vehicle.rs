//! [`Vehicle`]-related read definitions.
//!
//! [`Vehicle`]: crate::domain::Vehicle

pub mod list {
    //! [`Vehicle`]s list definitions.

    use common::Money;

    use crate::domain::{vehicle, Vehicle};

    /// Selector of a [`Vehicle`]s list as stored in a data store.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Selector {
        /// [`vehicle::Condition`] to select by, if any.
        pub condition: Option<vehicle::Condition>,
    }

    /// Criteria narrowing a full [`Vehicle`]s list down to the displayed one.
    ///
    /// Every criterion is optional: [`None`] (or [`Money::ZERO`] for price
    /// bounds) skips it. All the set criteria must hold for a [`Vehicle`] to
    /// pass.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Filter {
        /// Exact [`vehicle::Condition`].
        pub condition: Option<vehicle::Condition>,

        /// Inclusive lower price bound.
        pub min_price: Money,

        /// Inclusive upper price bound.
        pub max_price: Money,

        /// Exact [`vehicle::Make`], compared case-sensitively.
        pub make: Option<vehicle::Make>,

        /// Exact [`vehicle::Transmission`].
        pub transmission: Option<vehicle::Transmission>,

        /// Exact [`vehicle::FuelType`].
        pub fuel_type: Option<vehicle::FuelType>,
    }

    impl Filter {
        /// Indicates whether this [`Filter`] has no criteria set.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            *self == Self::default()
        }

        /// Checks whether the provided [`Vehicle`] satisfies all the criteria
        /// of this [`Filter`].
        #[must_use]
        pub fn matches(&self, vehicle: &Vehicle) -> bool {
            self.condition.is_none_or(|c| vehicle.condition == c)
                && (self.min_price.is_zero() || vehicle.price >= self.min_price)
                && (self.max_price.is_zero() || vehicle.price <= self.max_price)
                && self.make.as_ref().is_none_or(|m| &vehicle.make == m)
                && self.transmission.is_none_or(|t| vehicle.transmission == t)
                && self.fuel_type.is_none_or(|f| vehicle.fuel_type == f)
        }

        /// Applies this [`Filter`] to the provided full [`Vehicle`]s list.
        ///
        /// Preserves the order of the provided [`Vehicle`]s.
        #[must_use]
        pub fn apply(&self, vehicles: &[Vehicle]) -> Vec<Vehicle> {
            vehicles.iter().filter(|v| self.matches(v)).cloned().collect()
        }
    }

    #[cfg(test)]
    mod spec {
        use common::{DateTimeOf, Money};
        use proptest::{option, prelude::*, sample::select};

        use crate::domain::{
            vehicle::{
                Condition, Feature, FuelType, Make, Mileage, Model,
                Transmission, Year,
            },
            Vehicle,
        };

        use super::Filter;

        fn vehicle(
            id: &str,
            make: &str,
            price: u32,
            condition: Condition,
            transmission: Transmission,
            fuel_type: FuelType,
        ) -> Vehicle {
            Vehicle {
                id: id.into(),
                make: Make::new(make).unwrap(),
                model: Model::new("Model").unwrap(),
                year: Year::new(2020).unwrap(),
                price: Money::from(price),
                mileage: Mileage::from(10_000),
                condition,
                transmission,
                fuel_type,
                body_type: None,
                color: None,
                description: None,
                image_url: None,
                gallery: vec![],
                features: vec![],
                created_at: DateTimeOf::UNIX_EPOCH,
            }
        }

        fn catalogue() -> Vec<Vehicle> {
            vec![
                vehicle(
                    "1",
                    "BMW",
                    20_000,
                    Condition::Used,
                    Transmission::Automatic,
                    FuelType::Petrol,
                ),
                vehicle(
                    "2",
                    "Tesla",
                    90_000,
                    Condition::New,
                    Transmission::Automatic,
                    FuelType::Electric,
                ),
            ]
        }

        fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
            vehicles.iter().map(|v| v.id.as_ref()).collect()
        }

        prop_compose! {
            fn arb_vehicle()(
                id in "[a-z0-9]{1,8}",
                make in select(vec!["BMW", "Tesla", "Toyota", "bmw"]),
                price in 0u32..100_000,
                condition in select(Condition::ALL.to_vec()),
                transmission in select(Transmission::ALL.to_vec()),
                fuel_type in select(FuelType::ALL.to_vec()),
            ) -> Vehicle {
                vehicle(&id, make, price, condition, transmission, fuel_type)
            }
        }

        prop_compose! {
            fn arb_filter()(
                condition in option::of(select(Condition::ALL.to_vec())),
                min_price in prop_oneof![Just(0u32), 0u32..100_000],
                max_price in prop_oneof![Just(0u32), 0u32..100_000],
                make in option::of(select(vec!["BMW", "Tesla", "bmw"])),
                transmission in option::of(select(Transmission::ALL.to_vec())),
                fuel_type in option::of(select(FuelType::ALL.to_vec())),
            ) -> Filter {
                Filter {
                    condition,
                    min_price: Money::from(min_price),
                    max_price: Money::from(max_price),
                    make: make.and_then(Make::new),
                    transmission,
                    fuel_type,
                }
            }
        }

        proptest! {
            #[test]
            fn empty_filter_is_identity(
                vehicles in prop::collection::vec(arb_vehicle(), 0..16),
            ) {
                prop_assert_eq!(Filter::default().apply(&vehicles), vehicles);
            }

            #[test]
            fn result_is_conjunction_of_criteria(
                vehicles in prop::collection::vec(arb_vehicle(), 0..16),
                filter in arb_filter(),
            ) {
                let single = [
                    Filter { condition: filter.condition, ..Filter::default() },
                    Filter { min_price: filter.min_price, ..Filter::default() },
                    Filter { max_price: filter.max_price, ..Filter::default() },
                    Filter { make: filter.make.clone(), ..Filter::default() },
                    Filter {
                        transmission: filter.transmission,
                        ..Filter::default()
                    },
                    Filter { fuel_type: filter.fuel_type, ..Filter::default() },
                ];
                let expected: Vec<_> = vehicles
                    .iter()
                    .filter(|v| single.iter().all(|f| f.matches(v)))
                    .cloned()
                    .collect();

                prop_assert_eq!(filter.apply(&vehicles), expected);
            }

            #[test]
            fn result_is_ordered_subsequence(
                vehicles in prop::collection::vec(arb_vehicle(), 0..16),
                filter in arb_filter(),
            ) {
                let filtered = filter.apply(&vehicles);
                let mut rest = vehicles.iter();
                for v in &filtered {
                    prop_assert!(rest.any(|o| o == v));
                }
            }
        }

        #[test]
        fn max_price_narrows_down_catalogue() {
            let filter = Filter {
                condition: None,
                min_price: Money::ZERO,
                max_price: Money::from(50_000),
                make: None,
                transmission: None,
                fuel_type: None,
            };

            assert_eq!(ids(&filter.apply(&catalogue())), ["1"]);
        }

        #[test]
        fn price_bounds_are_inclusive() {
            let filter = Filter {
                min_price: Money::from(20_000),
                max_price: Money::from(90_000),
                ..Filter::default()
            };

            assert_eq!(ids(&filter.apply(&catalogue())), ["1", "2"]);
        }

        #[test]
        fn make_is_case_sensitive() {
            let filter = Filter {
                make: Make::new("bmw"),
                ..Filter::default()
            };

            assert!(filter.apply(&catalogue()).is_empty());
        }

        #[test]
        fn fuel_type_matches_fuel_type_field() {
            let filter = Filter {
                fuel_type: Some(FuelType::Electric),
                ..Filter::default()
            };

            assert_eq!(ids(&filter.apply(&catalogue())), ["2"]);
        }

        #[test]
        fn condition_ignores_features() {
            let mut used = catalogue().remove(0);
            used.features = vec![Feature::new("New").unwrap()];
            let filter = Filter {
                condition: Some(Condition::New),
                ..Filter::default()
            };

            assert!(!filter.matches(&used));
            assert!(filter.matches(&catalogue()[1]));
        }

        #[test]
        fn is_empty() {
            assert!(Filter::default().is_empty());
            assert!(!Filter {
                transmission: Some(Transmission::Manual),
                ..Filter::default()
            }
            .is_empty());
        }
    }
}
