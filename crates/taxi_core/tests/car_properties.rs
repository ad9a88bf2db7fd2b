use proptest::prelude::*;
use std::collections::BTreeSet;
use taxi_core::{
    Car, CarRepository, Driver, DriverRepository, Manufacturer, ManufacturerRepository,
    MemoryConnectionProvider, SqliteCarRepository, SqliteDriverRepository,
    SqliteManufacturerRepository,
};

const DRIVER_POOL: usize = 6;

/// Non-empty subsets of the seeded driver pool, as pool indexes.
fn driver_subset_strategy() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..DRIVER_POOL, 1..=DRIVER_POOL)
}

fn seed(provider: &MemoryConnectionProvider) -> (Manufacturer, Vec<Driver>) {
    let toyota = SqliteManufacturerRepository::new(provider)
        .create(Manufacturer::new("Toyota", "Japan"))
        .unwrap();
    let drivers = SqliteDriverRepository::new(provider);
    let pool = (0..DRIVER_POOL)
        .map(|index| {
            drivers
                .create(Driver::new(format!("driver-{index}"), format!("L{index}")))
                .unwrap()
        })
        .collect();
    (toyota, pool)
}

fn pick(pool: &[Driver], indexes: &BTreeSet<usize>) -> Vec<Driver> {
    indexes.iter().map(|&index| pool[index].clone()).collect()
}

fn id_set(drivers: &[Driver]) -> BTreeSet<i64> {
    drivers.iter().filter_map(|driver| driver.id).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn get_returns_the_driver_set_given_at_creation(chosen in driver_subset_strategy()) {
        let provider = MemoryConnectionProvider::try_new().unwrap();
        let repo = SqliteCarRepository::new(&provider);
        let (toyota, pool) = seed(&provider);

        let mut car = Car::new("Corolla", toyota);
        car.drivers = pick(&pool, &chosen);
        let created = repo.create(car).unwrap();

        let loaded = repo.get(created.id.unwrap()).unwrap().unwrap();
        prop_assert_eq!(id_set(&loaded.drivers), id_set(&created.drivers));
        prop_assert_eq!(loaded.drivers.len(), chosen.len());
    }

    #[test]
    fn update_leaves_exactly_the_new_driver_set(
        initial in driver_subset_strategy(),
        replacement in driver_subset_strategy(),
    ) {
        let provider = MemoryConnectionProvider::try_new().unwrap();
        let repo = SqliteCarRepository::new(&provider);
        let (toyota, pool) = seed(&provider);

        let mut car = Car::new("Corolla", toyota);
        car.drivers = pick(&pool, &initial);
        let mut car = repo.create(car).unwrap();

        car.drivers = pick(&pool, &replacement);
        let updated = repo.update(car).unwrap();

        let loaded = repo.get(updated.id.unwrap()).unwrap().unwrap();
        prop_assert_eq!(id_set(&loaded.drivers), id_set(&updated.drivers));
        prop_assert_eq!(loaded.drivers.len(), replacement.len());
    }
}
