//! Record type constants for the PPT binary format.
//!
//! Only a handful drive decoding; the rest exist so diagnostics can name the
//! record instead of printing a bare number.

macro_rules! record_types {
    ($($name:ident = $value:literal,)*) => {
        $(pub const $name: u16 = $value;)*

        /// Name of a well-known record type, `None` for anything else.
        pub fn name(type_code: u16) -> Option<&'static str> {
            match type_code {
                $($value => Some(stringify!($name)),)*
                _ => None,
            }
        }
    };
}

record_types! {
    RT_DOCUMENT = 0x03E8,
    RT_DOCUMENT_ATOM = 0x03E9,
    RT_END_DOCUMENT_ATOM = 0x03EA,
    RT_SLIDE = 0x03EE,
    RT_SLIDE_ATOM = 0x03EF,
    RT_NOTES = 0x03F0,
    RT_NOTES_ATOM = 0x03F1,
    RT_ENVIRONMENT = 0x03F2,
    RT_SLIDE_PERSIST_ATOM = 0x03F3,
    RT_MAIN_MASTER = 0x03F8,
    RT_SLIDE_SHOW_SLIDE_INFO_ATOM = 0x03F9,
    RT_SLIDE_VIEW_INFO = 0x03FA,
    RT_VIEW_INFO_ATOM = 0x03FD,
    RT_VBA_INFO = 0x03FF,
    RT_SLIDE_SHOW_DOC_INFO_ATOM = 0x0401,
    RT_SUMMARY = 0x0402,
    RT_EXTERNAL_OBJECT_LIST = 0x0409,
    RT_DRAWING_GROUP = 0x040B,
    RT_DRAWING = 0x040C,
    RT_NAMED_SHOWS = 0x0410,
    RT_NAMED_SHOW = 0x0411,
    RT_LIST = 0x07D0,
    RT_FONT_COLLECTION = 0x07D5,
    RT_SOUND_COLLECTION = 0x07E4,
    RT_SOUND = 0x07E6,
    RT_COLOR_SCHEME_ATOM = 0x07F0,
    RT_PLACEHOLDER_ATOM = 0x0BCB,
    RT_OUTLINE_TEXT_REF_ATOM = 0x0F9E,
    RT_TEXT_HEADER_ATOM = 0x0F9F,
    RT_TEXT_CHARS_ATOM = 0x0FA0,
    RT_STYLE_TEXT_PROP_ATOM = 0x0FA1,
    RT_MASTER_TEXT_PROP_ATOM = 0x0FA2,
    RT_TEXT_MASTER_STYLE_ATOM = 0x0FA3,
    RT_TEXT_RULER_ATOM = 0x0FA6,
    RT_TEXT_BYTES_ATOM = 0x0FA8,
    RT_TEXT_SPECIAL_INFO_ATOM = 0x0FAA,
    RT_FONT_ENTITY_ATOM = 0x0FB7,
    RT_CSTRING = 0x0FBA,
    RT_META_FILE = 0x0FC1,
    RT_HANDOUT = 0x0FC9,
    RT_EXTERNAL_OLE_EMBED = 0x0FCC,
    RT_EXTERNAL_HYPERLINK_ATOM = 0x0FD3,
    RT_EXTERNAL_HYPERLINK = 0x0FD7,
    RT_SLIDE_NUMBER_META_CHAR_ATOM = 0x0FD8,
    RT_HEADERS_FOOTERS = 0x0FD9,
    RT_HEADERS_FOOTERS_ATOM = 0x0FDA,
    RT_TEXT_INTERACTIVE_INFO_ATOM = 0x0FDF,
    RT_SLIDE_LIST_WITH_TEXT = 0x0FF0,
    RT_INTERACTIVE_INFO = 0x0FF2,
    RT_INTERACTIVE_INFO_ATOM = 0x0FF3,
    RT_USER_EDIT_ATOM = 0x0FF5,
    RT_CURRENT_USER_ATOM = 0x0FF6,
    RT_DATE_TIME_META_CHAR_ATOM = 0x0FF7,
    RT_FOOTER_META_CHAR_ATOM = 0x0FFA,
    RT_PROG_TAGS = 0x1388,
    RT_PROG_STRING_TAG = 0x1389,
    RT_PROG_BINARY_TAG = 0x138A,
    RT_BINARY_TAG_DATA_BLOB = 0x138B,
    RT_PRINT_OPTIONS_ATOM = 0x1770,
    RT_PERSIST_DIRECTORY_ATOM = 0x1772,
    RT_COMMENT10 = 0x2EE0,
    RT_COMMENT10_ATOM = 0x2EE1,
    RT_CRYPT_SESSION10_CONTAINER = 0x2F14,
    RT_SMART_TAG_STORE11_CONTAINER = 0x36B3,
    OFFICE_ART_DG_CONTAINER = 0xF002,
    OFFICE_ART_SPGR_CONTAINER = 0xF003,
    OFFICE_ART_SP_CONTAINER = 0xF004,
    OFFICE_ART_FDG = 0xF008,
    OFFICE_ART_FSPGR = 0xF009,
    OFFICE_ART_FSP = 0xF00A,
    OFFICE_ART_FOPT = 0xF00B,
    OFFICE_ART_CLIENT_TEXTBOX = 0xF00D,
    OFFICE_ART_CLIENT_ANCHOR = 0xF010,
    OFFICE_ART_CLIENT_DATA = 0xF011,
}

/// Human readable label for log messages: the constant name or the hex code.
pub fn describe(type_code: u16) -> String {
    match name(type_code) {
        Some(name) => name.to_string(),
        None => format!("0x{:04X}", type_code),
    }
}
