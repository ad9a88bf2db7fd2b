use taxi_core::{
    Driver, DriverRepository, Manufacturer, ManufacturerRepository, MemoryConnectionProvider,
    SqliteDriverRepository, SqliteManufacturerRepository,
};

#[test]
fn manufacturer_crud_respects_soft_delete() {
    let provider = MemoryConnectionProvider::try_new().unwrap();
    let repo = SqliteManufacturerRepository::new(&provider);

    let toyota = repo.create(Manufacturer::new("Toyota", "Japan")).unwrap();
    let mini = repo.create(Manufacturer::new("Mini", "England")).unwrap();
    assert_eq!(toyota.id, Some(1));
    assert_eq!(mini.id, Some(2));

    let mut renamed = mini.clone();
    renamed.name = "MINI".to_string();
    repo.update(renamed).unwrap();
    assert_eq!(repo.get(2).unwrap().unwrap().name, "MINI");

    assert!(repo.delete(1).unwrap());
    assert!(repo.get(1).unwrap().is_none());
    let names: Vec<_> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|manufacturer| manufacturer.name)
        .collect();
    assert_eq!(names, vec!["MINI".to_string()]);

    let mut stale = toyota;
    stale.country = "Elsewhere".to_string();
    repo.update(stale).unwrap();
    assert!(repo.get(1).unwrap().is_none());
    assert!(!repo.delete(77).unwrap());
}

#[test]
fn driver_crud_respects_soft_delete() {
    let provider = MemoryConnectionProvider::try_new().unwrap();
    let repo = SqliteDriverRepository::new(&provider);

    let ann = repo.create(Driver::new("Ann", "X1")).unwrap();
    let bob = repo.create(Driver::new("Bob", "X2")).unwrap();

    let mut relicensed = ann.clone();
    relicensed.license_number = "X1-renewed".to_string();
    repo.update(relicensed).unwrap();
    let loaded = repo.get(ann.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.license_number, "X1-renewed");
    assert!(!loaded.is_deleted);

    assert!(repo.delete(bob.id.unwrap()).unwrap());
    assert!(repo.get(bob.id.unwrap()).unwrap().is_none());
    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn update_without_identity_fails() {
    let provider = MemoryConnectionProvider::try_new().unwrap();

    let err = SqliteDriverRepository::new(&provider)
        .update(Driver::new("Draft", "D0"))
        .unwrap_err();
    assert!(err.message().starts_with("can't update driver"));

    let err = SqliteManufacturerRepository::new(&provider)
        .update(Manufacturer::new("Draft", "Nowhere"))
        .unwrap_err();
    assert!(err.message().starts_with("can't update manufacturer"));
}
