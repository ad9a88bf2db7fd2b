use taxi_core::{
    Car, CarService, Driver, DriverRepository, Manufacturer, ManufacturerRepository,
    MemoryConnectionProvider, SqliteCarRepository, SqliteDriverRepository,
    SqliteManufacturerRepository,
};

#[test]
fn add_and_remove_driver_persist_full_driver_list() {
    let provider = MemoryConnectionProvider::try_new().unwrap();
    let drivers = SqliteDriverRepository::new(&provider);
    let toyota = SqliteManufacturerRepository::new(&provider)
        .create(Manufacturer::new("Toyota", "Japan"))
        .unwrap();
    let ann = drivers.create(Driver::new("Ann", "X1")).unwrap();
    let bob = drivers.create(Driver::new("Bob", "X2")).unwrap();
    let service = CarService::new(SqliteCarRepository::new(&provider));

    let mut car = Car::new("Corolla", toyota);
    car.add_driver(ann.clone());
    let car = service.create(car).unwrap();
    let id = car.id.unwrap();

    let car = service.add_driver_to_car(bob.clone(), car).unwrap();
    let loaded = service.get(id).unwrap().unwrap();
    assert_eq!(loaded.driver_ids(), vec![ann.id.unwrap(), bob.id.unwrap()]);

    service.remove_driver_from_car(&ann, car).unwrap();
    let loaded = service.get(id).unwrap().unwrap();
    assert_eq!(loaded.driver_ids(), vec![bob.id.unwrap()]);

    let by_ann = service.get_all_by_driver(ann.id.unwrap()).unwrap();
    assert!(by_ann.is_empty());
    let by_bob = service.get_all_by_driver(bob.id.unwrap()).unwrap();
    assert_eq!(by_bob.len(), 1);
}

#[test]
fn removing_last_driver_makes_car_invisible() {
    let provider = MemoryConnectionProvider::try_new().unwrap();
    let toyota = SqliteManufacturerRepository::new(&provider)
        .create(Manufacturer::new("Toyota", "Japan"))
        .unwrap();
    let ann = SqliteDriverRepository::new(&provider)
        .create(Driver::new("Ann", "X1"))
        .unwrap();
    let service = CarService::new(SqliteCarRepository::new(&provider));

    let mut car = Car::new("Corolla", toyota);
    car.add_driver(ann.clone());
    let car = service.create(car).unwrap();
    let id = car.id.unwrap();
    assert_eq!(service.get_all().unwrap().len(), 1);

    service.remove_driver_from_car(&ann, car).unwrap();

    assert!(service.get(id).unwrap().is_none());
    assert!(service.get_all().unwrap().is_empty());
    assert!(service.delete(id).unwrap());
}

#[test]
fn cars_serialize_with_nested_manufacturer_and_drivers() {
    let mut car = Car::with_id(1, "Corolla", Manufacturer::with_id(1, "Toyota", "Japan"));
    car.add_driver(Driver::with_id(1, "Ann", "X1"));

    let json = serde_json::to_value(&car).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["model"], "Corolla");
    assert_eq!(json["manufacturer"]["country"], "Japan");
    assert_eq!(json["drivers"][0]["license_number"], "X1");
    assert_eq!(json["is_deleted"], false);

    let back: Car = serde_json::from_value(json).unwrap();
    assert_eq!(back, car);
}
