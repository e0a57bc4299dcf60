//! Compiled-in record layout tables for CWR 2.1 and 2.2.
//!
//! Positions are 1-indexed inclusive. Every table covers its record
//! contiguously from byte 1; the schema tests assert no gaps or overlaps.
//! Revisions share a table wherever the layout did not change between
//! 2.1 and 2.2 (only HDR and the work transaction header differ).

use cwr_model::CwrVersion;

use crate::schema::{FieldFormat, FieldSpec, RecordSchema};

use FieldFormat::{Alphanumeric, Boolean, Date, Duration, Flag, Lookup, Numeric, Time};

const fn man(name: &'static str, start: usize, len: usize, format: FieldFormat) -> FieldSpec {
    FieldSpec {
        name,
        start,
        len,
        format,
        mandatory: true,
    }
}

const fn opt(name: &'static str, start: usize, len: usize, format: FieldFormat) -> FieldSpec {
    FieldSpec {
        name,
        start,
        len,
        format,
        mandatory: false,
    }
}

// ---------------------------------------------------------------------------
// Structural records
// ---------------------------------------------------------------------------

static HDR_V21_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("version_number", 4, 5, Alphanumeric),
    man("sender_type", 9, 2, Lookup("Sender Type")),
    man("sender_id", 11, 9, Alphanumeric),
    man("sender_name", 20, 45, Alphanumeric),
    man("creation_date", 65, 8, Date),
    man("creation_time", 73, 6, Time),
    man("transmission_date", 79, 8, Date),
];

static HDR_V22_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("version_number", 4, 5, Alphanumeric),
    man("sender_type", 9, 2, Lookup("Sender Type")),
    man("sender_id", 11, 9, Alphanumeric),
    man("sender_name", 20, 45, Alphanumeric),
    man("creation_date", 65, 8, Date),
    man("creation_time", 73, 6, Time),
    man("transmission_date", 79, 8, Date),
    opt("character_set", 87, 15, Lookup("Character Set")),
];

static GRH_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_type", 4, 3, Lookup("Transaction Type")),
    man("group_id", 7, 5, Numeric),
    man("version_number", 12, 5, Alphanumeric),
    opt("batch_request_id", 17, 10, Numeric),
];

static GRT_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("group_id", 4, 5, Numeric),
    man("transaction_count", 9, 8, Numeric),
    man("record_count", 17, 8, Numeric),
];

static TRL_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("group_count", 4, 5, Numeric),
    man("transaction_count", 9, 8, Numeric),
    man("record_count", 17, 8, Numeric),
];

// ---------------------------------------------------------------------------
// Work transaction header (shared by WRK/REV/NWR/ISW/ISR)
// ---------------------------------------------------------------------------

static WORK_V21_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("submitter_work_number", 20, 14, Alphanumeric),
    man("title", 34, 60, Alphanumeric),
    opt("language_code", 94, 2, Lookup("Language")),
    opt("iswc", 96, 11, Alphanumeric),
    opt("copyright_date", 107, 8, Date),
    opt("duration", 115, 6, Duration),
    opt("recorded_indicator", 121, 1, Flag),
    man(
        "musical_work_distribution_category",
        122,
        3,
        Lookup("Musical Work Distribution Category"),
    ),
    man("version_type", 125, 3, Lookup("Version Type")),
    opt("excerpt_type", 128, 3, Lookup("Excerpt Type")),
    opt("composite_type", 131, 3, Lookup("Composite Type")),
    opt("lyric_adaptation", 134, 3, Lookup("Lyric Adaptation")),
    opt("music_arrangement", 137, 3, Lookup("Music Arrangement")),
    opt("catalogue_number", 140, 14, Alphanumeric),
    opt("opus_number", 154, 20, Alphanumeric),
    opt("work_type_code", 174, 2, Lookup("Work Type")),
    opt("grand_rights_indicator", 176, 1, Flag),
    opt("composite_component_count", 177, 3, Numeric),
    opt("date_of_publication", 180, 8, Date),
    opt("exceptional_clause", 188, 1, Flag),
    opt("priority_flag", 189, 1, Flag),
];

static WORK_V22_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("submitter_work_number", 20, 14, Alphanumeric),
    man("title", 34, 60, Alphanumeric),
    opt("language_code", 94, 2, Lookup("Language")),
    opt("iswc", 96, 11, Alphanumeric),
    opt("copyright_date", 107, 8, Date),
    opt("duration", 115, 6, Duration),
    opt("recorded_indicator", 121, 1, Flag),
    man(
        "musical_work_distribution_category",
        122,
        3,
        Lookup("Musical Work Distribution Category"),
    ),
    man("version_type", 125, 3, Lookup("Version Type")),
    opt("excerpt_type", 128, 3, Lookup("Excerpt Type")),
    opt("composite_type", 131, 3, Lookup("Composite Type")),
    opt("lyric_adaptation", 134, 3, Lookup("Lyric Adaptation")),
    opt("music_arrangement", 137, 3, Lookup("Music Arrangement")),
    opt("catalogue_number", 140, 14, Alphanumeric),
    opt("opus_number", 154, 20, Alphanumeric),
    opt("work_type_code", 174, 2, Lookup("Work Type")),
    opt("grand_rights_indicator", 176, 1, Flag),
    opt("composite_component_count", 177, 3, Numeric),
    opt("date_of_publication", 180, 8, Date),
    opt("exceptional_clause", 188, 1, Flag),
    opt("priority_flag", 189, 1, Flag),
    opt("text_music_relationship", 190, 3, Lookup("Text Music Relationship")),
];

// ---------------------------------------------------------------------------
// Detail records (layouts identical in 2.1 and 2.2)
// ---------------------------------------------------------------------------

static ALT_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("alternate_title", 20, 60, Alphanumeric),
    man("title_type", 80, 2, Lookup("Title Type")),
    opt("language_code", 82, 2, Lookup("Language")),
];

static EWT_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("entire_work_title", 20, 60, Alphanumeric),
    opt("iswc", 80, 11, Alphanumeric),
    opt("language_code", 91, 2, Lookup("Language")),
    opt("writer_one_last_name", 93, 45, Alphanumeric),
    opt("writer_one_first_name", 138, 30, Alphanumeric),
    opt("source", 168, 25, Alphanumeric),
];

static VER_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("original_work_title", 20, 60, Alphanumeric),
    opt("iswc", 80, 11, Alphanumeric),
    opt("language_code", 91, 2, Lookup("Language")),
    opt("writer_one_last_name", 93, 45, Alphanumeric),
    opt("writer_one_first_name", 138, 30, Alphanumeric),
    opt("source", 168, 25, Alphanumeric),
];

static PER_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("performing_artist_last_name", 20, 45, Alphanumeric),
    opt("performing_artist_first_name", 65, 30, Alphanumeric),
    opt("performing_artist_ipi_name_number", 95, 11, Alphanumeric),
    opt("performing_artist_ipi_base_number", 106, 13, Alphanumeric),
];

static REC_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    opt("release_date", 20, 8, Date),
    opt("recording_duration", 28, 6, Duration),
    opt("recording_title", 34, 60, Alphanumeric),
    opt("version_title", 94, 60, Alphanumeric),
    opt("recording_label", 154, 20, Alphanumeric),
    opt("recording_id", 174, 14, Alphanumeric),
    opt("isrc", 188, 12, Alphanumeric),
    opt("recording_format", 200, 1, Alphanumeric),
];

static ORN_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("intended_purpose", 20, 3, Lookup("Intended Purpose")),
    man("production_title", 23, 60, Alphanumeric),
    opt("cd_identifier", 83, 15, Alphanumeric),
    opt("cut_number", 98, 4, Numeric),
    opt("library", 102, 60, Alphanumeric),
    opt("bltvr", 162, 1, Lookup("BLTVR")),
    opt("production_year", 163, 4, Numeric),
    opt("episode_title", 167, 50, Alphanumeric),
    opt("episode_number", 217, 4, Numeric),
];

static SWR_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("interested_party_number", 20, 9, Alphanumeric),
    man("writer_last_name", 29, 45, Alphanumeric),
    opt("writer_first_name", 74, 30, Alphanumeric),
    opt("writer_unknown_indicator", 104, 1, Boolean),
    man("writer_role", 105, 2, Lookup("Writer Role")),
    opt("ipi_name_number", 107, 11, Alphanumeric),
    opt("pr_society", 118, 3, Numeric),
    man("pr_ownership_share", 121, 6, Numeric),
    opt("mr_society", 127, 3, Numeric),
    man("mr_ownership_share", 130, 6, Numeric),
    opt("sr_society", 136, 3, Numeric),
    man("sr_ownership_share", 139, 6, Numeric),
];

static SPU_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("publisher_sequence", 20, 2, Numeric),
    man("interested_party_number", 22, 9, Alphanumeric),
    man("publisher_name", 31, 45, Alphanumeric),
    opt("publisher_unknown_indicator", 76, 1, Boolean),
    man("publisher_type", 77, 2, Lookup("Publisher Type")),
    opt("submitter_agreement_number", 79, 14, Alphanumeric),
    opt("ipi_name_number", 93, 11, Alphanumeric),
    opt("pr_society", 104, 3, Numeric),
    man("pr_ownership_share", 107, 6, Numeric),
    opt("mr_society", 113, 3, Numeric),
    man("mr_ownership_share", 116, 6, Numeric),
    opt("sr_society", 122, 3, Numeric),
    man("sr_ownership_share", 125, 6, Numeric),
];

static TERRITORY_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("interested_party_number", 20, 9, Alphanumeric),
    man("pr_collection_share", 29, 6, Numeric),
    man("mr_collection_share", 35, 6, Numeric),
    man("sr_collection_share", 41, 6, Numeric),
    man("inclusion_exclusion_indicator", 47, 1, Alphanumeric),
    man("territory_code", 48, 4, Lookup("Territory")),
    opt("shares_change", 52, 1, Flag),
    opt("sequence_number", 53, 3, Numeric),
];

static PWR_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("publisher_ip_number", 20, 9, Alphanumeric),
    opt("publisher_name", 29, 45, Alphanumeric),
    opt("submitter_agreement_number", 74, 14, Alphanumeric),
    opt("society_assigned_agreement_number", 88, 14, Alphanumeric),
    man("writer_ip_number", 102, 9, Alphanumeric),
];

static COM_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("title", 20, 60, Alphanumeric),
    opt("iswc", 80, 11, Alphanumeric),
    opt("submitter_work_number", 91, 14, Alphanumeric),
    opt("duration", 105, 6, Duration),
    opt("writer_one_last_name", 111, 45, Alphanumeric),
    opt("writer_one_first_name", 156, 30, Alphanumeric),
];

static IND_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    man("instrument_code", 20, 3, Lookup("Instrument")),
    opt("number_of_players", 23, 3, Numeric),
];

static INS_FIELDS: &[FieldSpec] = &[
    man("record_type", 1, 3, Alphanumeric),
    man("transaction_sequence", 4, 8, Numeric),
    man("record_sequence", 12, 8, Numeric),
    opt("number_of_voices", 20, 3, Numeric),
    opt(
        "standard_instrumentation_type",
        23,
        3,
        Lookup("Standard Instrumentation Type"),
    ),
    opt("instrumentation_description", 26, 50, Alphanumeric),
];

// ---------------------------------------------------------------------------
// Schema statics
// ---------------------------------------------------------------------------

macro_rules! schema {
    ($ident:ident, $record_type:literal, $width:literal, $fields:expr) => {
        static $ident: RecordSchema = RecordSchema {
            record_type: $record_type,
            width: $width,
            fields: $fields,
        };
    };
}

schema!(HDR_V21, "HDR", 86, HDR_V21_FIELDS);
schema!(HDR_V22, "HDR", 101, HDR_V22_FIELDS);
schema!(GRH, "GRH", 26, GRH_FIELDS);
schema!(GRT, "GRT", 24, GRT_FIELDS);
schema!(TRL, "TRL", 24, TRL_FIELDS);

schema!(WRK_V21, "WRK", 189, WORK_V21_FIELDS);
schema!(REV_V21, "REV", 189, WORK_V21_FIELDS);
schema!(NWR_V21, "NWR", 189, WORK_V21_FIELDS);
schema!(ISW_V21, "ISW", 189, WORK_V21_FIELDS);
schema!(ISR_V21, "ISR", 189, WORK_V21_FIELDS);

schema!(WRK_V22, "WRK", 192, WORK_V22_FIELDS);
schema!(REV_V22, "REV", 192, WORK_V22_FIELDS);
schema!(NWR_V22, "NWR", 192, WORK_V22_FIELDS);
schema!(ISW_V22, "ISW", 192, WORK_V22_FIELDS);
schema!(ISR_V22, "ISR", 192, WORK_V22_FIELDS);

schema!(ALT, "ALT", 83, ALT_FIELDS);
schema!(EWT, "EWT", 192, EWT_FIELDS);
schema!(VER, "VER", 192, VER_FIELDS);
schema!(PER, "PER", 118, PER_FIELDS);
schema!(REC, "REC", 200, REC_FIELDS);
schema!(ORN, "ORN", 220, ORN_FIELDS);
schema!(SWR, "SWR", 144, SWR_FIELDS);
schema!(OWR, "OWR", 144, SWR_FIELDS);
schema!(SPU, "SPU", 130, SPU_FIELDS);
schema!(OPU, "OPU", 130, SPU_FIELDS);
schema!(SWT, "SWT", 55, TERRITORY_FIELDS);
schema!(OWT, "OWT", 55, TERRITORY_FIELDS);
schema!(SPT, "SPT", 55, TERRITORY_FIELDS);
schema!(OPT, "OPT", 55, TERRITORY_FIELDS);
schema!(PWR, "PWR", 110, PWR_FIELDS);
schema!(COM, "COM", 185, COM_FIELDS);
schema!(IND, "IND", 25, IND_FIELDS);
schema!(INS, "INS", 75, INS_FIELDS);

static V21_SCHEMAS: &[&RecordSchema] = &[
    &HDR_V21, &GRH, &GRT, &TRL, &WRK_V21, &REV_V21, &NWR_V21, &ISW_V21, &ISR_V21, &ALT, &EWT,
    &VER, &PER, &REC, &ORN, &SWR, &OWR, &SPU, &OPU, &SWT, &OWT, &SPT, &OPT, &PWR, &COM, &IND,
    &INS,
];

static V22_SCHEMAS: &[&RecordSchema] = &[
    &HDR_V22, &GRH, &GRT, &TRL, &WRK_V22, &REV_V22, &NWR_V22, &ISW_V22, &ISR_V22, &ALT, &EWT,
    &VER, &PER, &REC, &ORN, &SWR, &OWR, &SPU, &OPU, &SWT, &OWT, &SPT, &OPT, &PWR, &COM, &IND,
    &INS,
];

/// All record schemas for one revision.
pub fn schemas(version: CwrVersion) -> &'static [&'static RecordSchema] {
    match version {
        CwrVersion::V21 => V21_SCHEMAS,
        CwrVersion::V22 => V22_SCHEMAS,
    }
}
