use bandbook_core::db::open_db_in_memory;
use bandbook_core::{
    AlbumConnectionInput, CatalogError, CatalogService, MembershipInput, NewAlbum, NewBand,
    RecordKind, SqliteCatalogRepository,
};

#[test]
fn band_detail_joins_member_names_and_album_titles() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());

    let band = catalog.create_band(&NewBand::new("Nocturne")).unwrap();
    let ada = catalog.create_member("Ada Vance").unwrap();
    let rui = catalog.create_member("Rui Okafor").unwrap();
    let album = catalog
        .create_album(&NewAlbum::new("Lanterns", Some(2013)))
        .unwrap();

    let mut vocals = MembershipInput::new(band.id, ada.id);
    vocals.role = Some("Vocals".to_string());
    catalog.create_membership(&vocals).unwrap();
    catalog
        .create_membership(&MembershipInput::new(band.id, rui.id))
        .unwrap();
    let mut credit = AlbumConnectionInput::new(band.id, album.id);
    credit.release_year = Some(2019);
    catalog.create_album_connection(&credit).unwrap();

    let detail = catalog.band_detail(band.id).unwrap();
    assert_eq!(detail.band, band);
    let names: Vec<_> = detail
        .memberships
        .iter()
        .map(|view| view.member_name.as_str())
        .collect();
    assert_eq!(names, ["Ada Vance", "Rui Okafor"]);
    assert_eq!(detail.memberships[0].membership.role.as_deref(), Some("Vocals"));

    assert_eq!(detail.albums.len(), 1);
    assert_eq!(detail.albums[0].album_title, "Lanterns");
    assert_eq!(detail.albums[0].album_release_year, Some(2013));
    assert_eq!(detail.albums[0].connection.release_year, Some(2019));
}

#[test]
fn band_overview_lists_every_band_including_empty_ones() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());

    let busy = catalog.create_band(&NewBand::new("Busy")).unwrap();
    let idle = catalog.create_band(&NewBand::new("Idle")).unwrap();
    let member = catalog.create_member("Ada Vance").unwrap();
    catalog
        .create_membership(&MembershipInput::new(busy.id, member.id))
        .unwrap();

    let overview = catalog.band_overview().unwrap();
    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].band.id, busy.id);
    assert_eq!(overview[0].memberships.len(), 1);
    assert_eq!(overview[1].band.id, idle.id);
    assert!(overview[1].memberships.is_empty());
    assert!(overview[1].albums.is_empty());
}

#[test]
fn band_detail_for_missing_band_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());

    assert!(matches!(
        catalog.band_detail(42).unwrap_err(),
        CatalogError::NotFound {
            kind: RecordKind::Band,
            id: 42
        }
    ));
}

#[test]
fn band_detail_serializes_flat_band_fields() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());
    let band = catalog
        .create_band(&NewBand {
            name: "Nocturne".to_string(),
            formed_year: Some(2011),
            home_location: Some("Seattle".to_string()),
        })
        .unwrap();

    let json = serde_json::to_value(catalog.band_detail(band.id).unwrap()).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Nocturne");
    assert_eq!(json["formed_year"], 2011);
    assert_eq!(json["home_location"], "Seattle");
    assert!(json["memberships"].as_array().unwrap().is_empty());
}
