//! Mountain ranges known to the scraper, addressed by their hribi.net slug.

const LISTING_BASE: &str = "https://www.hribi.net/gorovje";

pub const DEFAULT_RANGE: &str = "strojna_kosenjak_kozjak_in_slovenske_gorice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePreset {
    pub slug: &'static str,
    pub id: u32,
}

impl RangePreset {
    pub fn listing_url(&self) -> String {
        format!("{LISTING_BASE}/{}/{}", self.slug, self.id)
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.slug)
    }
}

pub const RANGES: [RangePreset; 10] = [
    RangePreset {
        slug: "gorisko_notranjsko_in_sneznisko_hribovje",
        id: 26,
    },
    RangePreset {
        slug: "julijske_alpe",
        id: 1,
    },
    RangePreset {
        slug: "kamnisko_savinjske_alpe",
        id: 3,
    },
    RangePreset {
        slug: "karavanke",
        id: 11,
    },
    RangePreset {
        slug: "pohorje_dravinjske_gorice_in_haloze",
        id: 4,
    },
    RangePreset {
        slug: "polhograjsko_hribovje_in_ljubljana",
        id: 5,
    },
    RangePreset {
        slug: "posavsko_hribovje_in_dolenjska",
        id: 25,
    },
    RangePreset {
        slug: "prekmurje",
        id: 163,
    },
    RangePreset {
        slug: "skofjelosko_cerkljansko_hribovje_in_jelovica",
        id: 21,
    },
    RangePreset {
        slug: "strojna_kosenjak_kozjak_in_slovenske_gorice",
        id: 162,
    },
];

pub fn find_range(slug: &str) -> Option<&'static RangePreset> {
    RANGES.iter().find(|range| range.slug.eq_ignore_ascii_case(slug))
}
