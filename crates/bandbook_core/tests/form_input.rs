use bandbook_core::db::open_db_in_memory;
use bandbook_core::form::{
    ALBUM_ID, ALBUM_TITLE, BAND_CONNECTION, BAND_ID, BAND_NAME, END_YEAR, FORMED_YEAR,
    HOME_LOCATION, MEMBER_ID, MEMBER_NAME, RELEASE_YEAR, ROLE, START_YEAR,
};
use bandbook_core::{
    AlbumConnectionForm, AlbumForm, BandForm, CatalogService, FormFields, MemberForm,
    MembershipForm, SqliteCatalogRepository, ValidationError,
};

#[test]
fn band_form_maps_blank_optionals_to_unset() {
    let fields = FormFields::new()
        .with(BAND_NAME, "Nocturne")
        .with(FORMED_YEAR, "")
        .with(HOME_LOCATION, "  ");

    let band = BandForm::parse(&fields).unwrap();
    assert_eq!(band.name, "Nocturne");
    assert_eq!(band.formed_year, None);
    assert_eq!(band.home_location, None);
}

#[test]
fn band_form_requires_name() {
    let fields = FormFields::new().with(FORMED_YEAR, "2011");
    assert_eq!(
        BandForm::parse(&fields).unwrap_err(),
        ValidationError::MissingField(BAND_NAME)
    );
}

#[test]
fn band_form_rejects_malformed_year() {
    let fields = FormFields::new()
        .with(BAND_NAME, "Nocturne")
        .with(FORMED_YEAR, "2011a");
    assert!(matches!(
        BandForm::parse(&fields).unwrap_err(),
        ValidationError::MalformedNumber { field: FORMED_YEAR, .. }
    ));
}

#[test]
fn member_form_yields_name() {
    let fields = FormFields::new().with(MEMBER_NAME, "Ada Vance");
    assert_eq!(MemberForm::parse(&fields).unwrap(), "Ada Vance");
}

#[test]
fn album_form_blank_release_year_is_unset_end_to_end() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CatalogService::new(SqliteCatalogRepository::try_new(&conn).unwrap());

    let fields = FormFields::new()
        .with(ALBUM_TITLE, "Demos")
        .with(RELEASE_YEAR, "");
    let album = catalog
        .create_album(&AlbumForm::parse(&fields).unwrap())
        .unwrap();

    assert_eq!(catalog.get_album(album.id).unwrap().release_year, None);
}

#[test]
fn membership_form_parses_ids_and_optional_fields() {
    let fields: FormFields = [
        (BAND_ID, "1"),
        (MEMBER_ID, "2"),
        (ROLE, "Guitar"),
        (START_YEAR, "1999"),
        (END_YEAR, ""),
    ]
    .into_iter()
    .collect();

    let input = MembershipForm::parse(&fields).unwrap();
    assert_eq!(input.band_id, 1);
    assert_eq!(input.member_id, 2);
    assert_eq!(input.role.as_deref(), Some("Guitar"));
    assert_eq!(input.start_year, Some(1999));
    assert_eq!(input.end_year, None);
}

#[test]
fn membership_form_without_member_id_is_rejected() {
    let fields = FormFields::new().with(BAND_ID, "1");
    assert_eq!(
        MembershipForm::parse(&fields).unwrap_err(),
        ValidationError::MissingField(MEMBER_ID)
    );
}

#[test]
fn album_connection_form_parses_all_fields() {
    let fields = FormFields::new()
        .with(BAND_ID, "3")
        .with(ALBUM_ID, "4")
        .with(BAND_CONNECTION, "Featured")
        .with(RELEASE_YEAR, "0");

    let input = AlbumConnectionForm::parse(&fields).unwrap();
    assert_eq!(input.band_id, 3);
    assert_eq!(input.album_id, 4);
    assert_eq!(input.connection_type.as_deref(), Some("Featured"));
    assert_eq!(input.release_year, Some(0));
}

#[test]
fn album_connection_form_rejects_non_numeric_album_id() {
    let fields = FormFields::new()
        .with(BAND_ID, "3")
        .with(ALBUM_ID, "four");
    assert!(matches!(
        AlbumConnectionForm::parse(&fields).unwrap_err(),
        ValidationError::MalformedNumber { field: ALBUM_ID, .. }
    ));
}
