//! Image catalog: which stock photo suits which kind of grant
//!
//! Everything here is static data. Lookups are case-insensitive and never
//! fail; an unknown tag simply yields no candidates and the selector falls
//! back to [`FALLBACK_IMAGES`].

use crate::types::GrantType;

/// An industry/category tag and the photos that represent it
#[derive(Debug)]
pub struct CategoryEntry {
    pub tag: &'static str,
    /// Alternative spellings, also matched as substrings of grant text
    pub aliases: &'static [&'static str],
    pub images: &'static [&'static str],
}

impl CategoryEntry {
    /// Every key this entry answers to, the tag first
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.tag).chain(self.aliases.iter().copied())
    }
}

#[derive(Debug)]
pub struct ProvinceEntry {
    pub name: &'static str,
    /// Two-letter postal abbreviation
    pub code: &'static str,
    pub images: &'static [&'static str],
}

/// A funding organization with a dedicated brand image
#[derive(Debug)]
pub struct BrandEntry {
    pub name: &'static str,
    /// Lowercase names the organization goes by in titles and descriptions
    pub aliases: &'static [&'static str],
    pub image: &'static str,
}

/// Province values that mean "available everywhere"
const NATIONWIDE: &[&str] = &[
    "",
    "all",
    "all provinces",
    "canada",
    "federal",
    "national",
    "nationwide",
];

const CATEGORIES: &[CategoryEntry] = &[
    CategoryEntry {
        tag: "technology",
        aliases: &["tech", "software", "digital technology", "artificial intelligence", "cybersecurity", "information technology"],
        images: &[
            "https://images.unsplash.com/photo-1588428614847-36f980b409e8?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1588290026552-22c87e25ca0a?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1655413111690-3b1c0baf89a8?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1528382098426-4ff276c1b971?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "innovation",
        aliases: &["commercialization", "research and development"],
        images: &[
            "https://images.unsplash.com/photo-1712990299858-7c83a0c58296?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1594264327454-f3a59a68c81a?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1650505525691-ae42df9e687b?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1518094487278-0b43898746a5?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "research",
        aliases: &["r&d", "science", "scientific"],
        images: &[
            "https://images.unsplash.com/photo-1543759380235-e0f35b910b23?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1507117060191-3df41fdae85e?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1599684399072-5e5ab335076a?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "agriculture",
        aliases: &["agri", "farm", "crop", "livestock"],
        images: &[
            "https://images.unsplash.com/photo-1565861402438-4771cf329113?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1643615879226-5e9df18d6995?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1599955105972-f9b9e561a53a?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1719065860468-bead46da9061?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "food",
        aliases: &["food processing", "food and beverage", "agrifood"],
        images: &[
            "https://images.unsplash.com/photo-1594836640512-beb8379d366e?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1684773598079-c918528fd00a?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1703056054904-bd306c8b4c30?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "manufacturing",
        aliases: &["manufactur", "industrial", "factory"],
        images: &[
            "https://images.unsplash.com/photo-1575986259634-157ddd25eaf5?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1562601876720-da6e98362012?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1536715029510-d1e66933cd08?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1642566182950-6e874f946b17?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "healthcare",
        aliases: &["health", "medical", "life sciences", "biotech"],
        images: &[
            "https://images.unsplash.com/photo-1631462537985-1826cdbb7e5d?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1662288456242-cde111269530?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1704927682446-f2b3c92a45c2?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1619203659988-1d67cd48ce59?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "energy",
        aliases: &["renewable", "solar", "wind power", "hydrogen"],
        images: &[
            "https://images.unsplash.com/photo-1513795076171-90fd83c80f9f?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1541660149859-eeb370555a4d?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1578170572003-30360210e796?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1512230096493-680966262cb3?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "clean technology",
        aliases: &["cleantech", "clean tech", "climate", "environment", "sustainab", "emission"],
        images: &[
            "https://images.unsplash.com/photo-1546042234289-4de4338dd864?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1668980900866-c4d3426dd697?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1611854691605-9a7b8abcc2fd?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1668347649008-fad650a239f9?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "tourism",
        aliases: &["hospitality", "travel", "visitor"],
        images: &[
            "https://images.unsplash.com/photo-1564179632657-384874db3979?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1543081472200-f6a984f27d25?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1542143422149-a5b8fd896cbf?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "indigenous",
        aliases: &["first nations", "metis", "métis", "inuit", "aboriginal"],
        images: &[
            "https://images.unsplash.com/photo-1550984697286-1d3ce3c146cc?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1541494393680-7d4e4e68b018?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1533271318495-c784ee706584?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "women",
        aliases: &["woman", "female founder"],
        images: &[
            "https://images.unsplash.com/photo-1533092435146-c23761a0fed8?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1645059949752-0b82327319db?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1639368547627-f2f022acc10d?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "youth",
        aliases: &["young entrepreneur", "student", "youth employment"],
        images: &[
            "https://images.unsplash.com/photo-1681096423039-c3a093058be7?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1580869419140-6f00d6e5d7a7?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1506540424611-7ea36f5ede7f?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "export",
        aliases: &["international trade", "global market", "trade show"],
        images: &[
            "https://images.unsplash.com/photo-1683490561244-d5139a841cc3?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1696305592931-f87c671768df?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1595479987771-0446cc3943e4?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "culture",
        aliases: &["arts and culture", "artist", "music", "heritage", "cultural"],
        images: &[
            "https://images.unsplash.com/photo-1686620340750-2c1dc185ab8b?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1644093000941-ae3d76680137?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1532340279396-846c567badd9?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "film",
        aliases: &["television", "digital media", "video game", "broadcast"],
        images: &[
            "https://images.unsplash.com/photo-1555311489809-43cf3d42b4f1?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1595034647784-09f9fffac15f?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1580264152433-a3c611538726?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "education",
        aliases: &["training", "skills", "apprentice"],
        images: &[
            "https://images.unsplash.com/photo-1658068065179-2f34694b23ef?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1632817932764-e18e66f06a51?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1568703096178-b528f3b25f25?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "employment",
        aliases: &["hiring", "wage subsidy", "workforce", "job creation"],
        images: &[
            "https://images.unsplash.com/photo-1524212095126-fdd61211634f?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1689951860908-271afa45ef7e?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1504554056594-64f4dae1b30f?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "small business",
        aliases: &["main street", "retail", "storefront"],
        images: &[
            "https://images.unsplash.com/photo-1503033330197-bd0a059569f6?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1573854157972-b91e2e4bce80?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1550195677322-f2a54fb13608?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1608518064720-a7dfe845b228?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "startup",
        aliases: &["start-up", "early-stage", "venture"],
        images: &[
            "https://images.unsplash.com/photo-1636013921397-4e097210af9b?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1551803593141-703813b916d6?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1604628088263-e6b0c7c8af0c?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "construction",
        aliases: &["infrastructure", "trades"],
        images: &[
            "https://images.unsplash.com/photo-1693764072775-85e9925cac95?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1513084717720-264fd4d7cb3c?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1716416737685-c90512dd6194?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "transportation",
        aliases: &["transport", "logistics", "electric vehicle", "automotive"],
        images: &[
            "https://images.unsplash.com/photo-1596131905519-d0faa6ffde2a?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1691632045932-30115df41b93?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1505095914868-611a0cf519be?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "forestry",
        aliases: &["forest", "lumber", "timber"],
        images: &[
            "https://images.unsplash.com/photo-1648887018213-39c548172778?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1668792513907-9e2977bf4b79?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1715903642614-c50ab4061b7c?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "fisheries",
        aliases: &["fishing", "aquaculture", "ocean", "seafood"],
        images: &[
            "https://images.unsplash.com/photo-1676455648615-acf2703912a1?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1604558877300-cea36e283522?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1667937508160-d7087793ee86?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "mining",
        aliases: &["mineral", "critical minerals"],
        images: &[
            "https://images.unsplash.com/photo-1503940565850-a3950d9ef123?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1568199497937-c067e3d31a30?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1588647980708-9d537b5140f0?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "rural",
        aliases: &["remote communit", "northern"],
        images: &[
            "https://images.unsplash.com/photo-1563383869129-fc4b00f430c8?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1616872315352-2bf3a406826d?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1565725900900-947ba02329d8?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "community",
        aliases: &["non-profit", "nonprofit", "charity", "social enterprise"],
        images: &[
            "https://images.unsplash.com/photo-1510730264150-bcebceef2b63?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1575901709408-a2d3ffa284ec?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1540976369993-7b0316070a37?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "housing",
        aliases: &["real estate", "home renovation", "affordable home"],
        images: &[
            "https://images.unsplash.com/photo-1674202313242-723710732c19?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1687286407617-d4649f0ba5b8?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1595935969565-31f24facff85?w=800&h=400&fit=crop",
        ],
    },
    CategoryEntry {
        tag: "aerospace",
        aliases: &["aviation", "aircraft"],
        images: &[
            "https://images.unsplash.com/photo-1614169223516-8edbe5a40883?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1622059414682-e452b4c860ed?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1536586591412-ad2102bb3cd4?w=800&h=400&fit=crop",
        ],
    },
];

const PROVINCES: &[ProvinceEntry] = &[
    ProvinceEntry {
        name: "Alberta",
        code: "AB",
        images: &[
            "https://images.unsplash.com/photo-1568285923040-f74b4c7de9e9?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1672686626748-785138bfb8bf?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "British Columbia",
        code: "BC",
        images: &[
            "https://images.unsplash.com/photo-1715113523549-09d56620b293?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1558419787140-faa75fbd5e1b?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Manitoba",
        code: "MB",
        images: &[
            "https://images.unsplash.com/photo-1608795008426-ada7f56d077b?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1599159892317-69ac7f7893c1?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "New Brunswick",
        code: "NB",
        images: &[
            "https://images.unsplash.com/photo-1584103252647-d6ac9cd01c5e?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1575040958271-2262aa23c7f9?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Newfoundland and Labrador",
        code: "NL",
        images: &[
            "https://images.unsplash.com/photo-1600009827758-e9e1498641c1?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1685650090163-44e27650f3de?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Nova Scotia",
        code: "NS",
        images: &[
            "https://images.unsplash.com/photo-1615229779315-078a0a18a66a?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1707193407862-a7b3c20b0bfe?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Ontario",
        code: "ON",
        images: &[
            "https://images.unsplash.com/photo-1710735212480-eb53bc228d72?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1675517768548-e9fe27448c4d?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Prince Edward Island",
        code: "PE",
        images: &[
            "https://images.unsplash.com/photo-1655343129776-55d139afe0b3?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1619603121777-dcfd368836d4?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Quebec",
        code: "QC",
        images: &[
            "https://images.unsplash.com/photo-1553833336441-601b750024a6?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1654973739415-6dd55d60c9bf?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Saskatchewan",
        code: "SK",
        images: &[
            "https://images.unsplash.com/photo-1530098312951-cf6ead634dd7?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1572520089386-f094556051e9?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Northwest Territories",
        code: "NT",
        images: &[
            "https://images.unsplash.com/photo-1682518988460-af0592d6c7bf?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1564300331764-31a44a0482fb?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Nunavut",
        code: "NU",
        images: &[
            "https://images.unsplash.com/photo-1684196749369-d60db49109e7?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1692179059324-e021f4ad2e4f?w=800&h=400&fit=crop",
        ],
    },
    ProvinceEntry {
        name: "Yukon",
        code: "YT",
        images: &[
            "https://images.unsplash.com/photo-1708618597872-211cb3b02367?w=800&h=400&fit=crop",
            "https://images.unsplash.com/photo-1685712687635-2efe446e967d?w=800&h=400&fit=crop",
        ],
    },
];

const FEDERAL_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1667091836911-da5ce0a5bd1b?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1509612347383-0ddebab59765?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1575446924695-4d455e10b52a?w=800&h=400&fit=crop",
];

const PROVINCIAL_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1681684366048-d0167420ed9c?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1612149156137-cf0237e03386?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1596590417812-bbf4822911e2?w=800&h=400&fit=crop",
];

const PRIVATE_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1716757047394-9b896e4a72ae?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1562213047612-7a3348cb9c90?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1562998211006-bb6ded820ad0?w=800&h=400&fit=crop",
];

/// Used when nothing about a grant matches the catalog
pub const FALLBACK_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1572171430029-41bc0dc6bf2b?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1596287347925-2c0125289e31?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1530847526942-63f7fbd3c6be?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1676767143402-8f9958788458?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1665008317276-6a75094e1d0e?w=800&h=400&fit=crop",
    "https://images.unsplash.com/photo-1570981731115-056b76283d0b?w=800&h=400&fit=crop",
];

const BRANDS: &[BrandEntry] = &[
    BrandEntry {
        name: "Business Development Bank of Canada",
        aliases: &["business development bank", "bdc"],
        image: "https://logo.clearbit.com/bdc.ca",
    },
    BrandEntry {
        name: "Export Development Canada",
        aliases: &["export development canada"],
        image: "https://logo.clearbit.com/edc.ca",
    },
    BrandEntry {
        name: "Farm Credit Canada",
        aliases: &["farm credit canada", "fcc"],
        image: "https://logo.clearbit.com/fcc-fac.ca",
    },
    BrandEntry {
        name: "NRC IRAP",
        aliases: &["industrial research assistance program", "irap"],
        image: "https://logo.clearbit.com/nrc-cnrc.gc.ca",
    },
    BrandEntry {
        name: "Mitacs",
        aliases: &["mitacs"],
        image: "https://logo.clearbit.com/mitacs.ca",
    },
    BrandEntry {
        name: "NSERC",
        aliases: &["nserc", "natural sciences and engineering research council"],
        image: "https://logo.clearbit.com/nserc-crsng.gc.ca",
    },
    BrandEntry {
        name: "SSHRC",
        aliases: &["sshrc", "social sciences and humanities research council"],
        image: "https://logo.clearbit.com/sshrc-crsh.gc.ca",
    },
    BrandEntry {
        name: "CIHR",
        aliases: &["cihr", "canadian institutes of health research"],
        image: "https://logo.clearbit.com/cihr-irsc.gc.ca",
    },
    BrandEntry {
        name: "Futurpreneur",
        aliases: &["futurpreneur"],
        image: "https://logo.clearbit.com/futurpreneur.ca",
    },
    BrandEntry {
        name: "Canada Council for the Arts",
        aliases: &["canada council for the arts"],
        image: "https://logo.clearbit.com/canadacouncil.ca",
    },
    BrandEntry {
        name: "Telefilm Canada",
        aliases: &["telefilm"],
        image: "https://logo.clearbit.com/telefilm.ca",
    },
    BrandEntry {
        name: "Ontario Trillium Foundation",
        aliases: &["ontario trillium foundation", "trillium foundation"],
        image: "https://logo.clearbit.com/otf.ca",
    },
    BrandEntry {
        name: "Atlantic Canada Opportunities Agency",
        aliases: &["atlantic canada opportunities agency", "acoa"],
        image: "https://logo.clearbit.com/acoa-apeca.gc.ca",
    },
    BrandEntry {
        name: "Sustainable Development Technology Canada",
        aliases: &["sustainable development technology canada", "sdtc"],
        image: "https://logo.clearbit.com/sdtc.ca",
    },
    BrandEntry {
        name: "RBC",
        aliases: &["royal bank of canada", "rbc"],
        image: "https://logo.clearbit.com/rbc.com",
    },
    BrandEntry {
        name: "TD Bank",
        aliases: &["td bank", "toronto-dominion"],
        image: "https://logo.clearbit.com/td.com",
    },
    BrandEntry {
        name: "Scotiabank",
        aliases: &["scotiabank", "bank of nova scotia"],
        image: "https://logo.clearbit.com/scotiabank.com",
    },
    BrandEntry {
        name: "BMO",
        aliases: &["bmo", "bank of montreal"],
        image: "https://logo.clearbit.com/bmo.com",
    },
    BrandEntry {
        name: "CIBC",
        aliases: &["cibc"],
        image: "https://logo.clearbit.com/cibc.com",
    },
    BrandEntry {
        name: "Desjardins",
        aliases: &["desjardins"],
        image: "https://logo.clearbit.com/desjardins.com",
    },
    BrandEntry {
        name: "Bell Canada",
        aliases: &["bell canada", "bell let's talk"],
        image: "https://logo.clearbit.com/bell.ca",
    },
    BrandEntry {
        name: "TELUS",
        aliases: &["telus"],
        image: "https://logo.clearbit.com/telus.com",
    },
    BrandEntry {
        name: "Rogers",
        aliases: &["rogers communications", "rogers"],
        image: "https://logo.clearbit.com/rogers.com",
    },
    BrandEntry {
        name: "Shopify",
        aliases: &["shopify"],
        image: "https://logo.clearbit.com/shopify.com",
    },
    BrandEntry {
        name: "Google",
        aliases: &["google"],
        image: "https://logo.clearbit.com/google.com",
    },
    BrandEntry {
        name: "Microsoft",
        aliases: &["microsoft"],
        image: "https://logo.clearbit.com/microsoft.com",
    },
];

const TYPE_IMAGES: &[(GrantType, &[&str])] = &[
    (GrantType::Federal, FEDERAL_IMAGES),
    (GrantType::Provincial, PROVINCIAL_IMAGES),
    (GrantType::Private, PRIVATE_IMAGES),
];

/// Lookup tables mapping grant metadata to candidate image URLs
#[derive(Debug, Clone, Copy)]
pub struct ImageCatalog {
    categories: &'static [CategoryEntry],
    provinces: &'static [ProvinceEntry],
    types: &'static [(GrantType, &'static [&'static str])],
    brands: &'static [BrandEntry],
    fallback: &'static [&'static str],
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ImageCatalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Self {
            categories: CATEGORIES,
            provinces: PROVINCES,
            types: TYPE_IMAGES,
            brands: BRANDS,
            fallback: FALLBACK_IMAGES,
        }
    }

    #[cfg(test)]
    pub fn new(
        categories: &'static [CategoryEntry],
        provinces: &'static [ProvinceEntry],
        types: &'static [(GrantType, &'static [&'static str])],
        brands: &'static [BrandEntry],
        fallback: &'static [&'static str],
    ) -> Self {
        Self {
            categories,
            provinces,
            types,
            brands,
            fallback,
        }
    }

    /// Candidate images for any tag the catalog knows: a category or one of
    /// its aliases, a province name or code, a grant type, or a brand name.
    /// Unknown tags yield an empty list.
    pub fn lookup(&self, tag: &str) -> Vec<&'static str> {
        if let Some(entry) = self.category(tag) {
            return entry.images.to_vec();
        }
        if let Some(images) = self.province(tag) {
            return images.to_vec();
        }
        let grant_type = GrantType::from_str(tag);
        if grant_type != GrantType::Other {
            return self.type_images(grant_type).to_vec();
        }
        let tag = normalize(tag);
        self.brands
            .iter()
            .find(|brand| brand.name.to_lowercase() == tag)
            .map(|brand| vec![brand.image])
            .unwrap_or_default()
    }

    /// Category whose tag or alias equals `tag` (ignoring case and padding)
    pub fn category(&self, tag: &str) -> Option<&'static CategoryEntry> {
        let tag = normalize(tag);
        if tag.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .find(|entry| entry.keys().any(|key| key == tag))
    }

    /// Images for a province given by name or postal code. Nationwide
    /// sentinels and unknown provinces give `None`.
    pub fn province(&self, province: &str) -> Option<&'static [&'static str]> {
        if is_nationwide(province) {
            return None;
        }
        let province = normalize(province);
        self.provinces
            .iter()
            .find(|entry| {
                entry.name.to_lowercase() == province || entry.code.to_lowercase() == province
            })
            .map(|entry| entry.images)
    }

    pub fn type_images(&self, grant_type: GrantType) -> &'static [&'static str] {
        self.types
            .iter()
            .find(|(t, _)| *t == grant_type)
            .map(|(_, images)| *images)
            .unwrap_or(&[])
    }

    /// First brand whose alias appears as a whole word in `text`
    pub fn brand_in(&self, text: &str) -> Option<&'static BrandEntry> {
        let text = text.to_lowercase();
        self.brands
            .iter()
            .find(|brand| brand.aliases.iter().any(|alias| contains_word(&text, alias)))
    }

    /// Categories with a key appearing anywhere in `text`, in catalog order
    pub fn keyword_matches<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = &'static CategoryEntry> + 'a {
        let text = text.to_lowercase();
        self.categories
            .iter()
            .filter(move |entry| entry.keys().any(|key| text.contains(key)))
    }

    /// Provinces named in `text`, matched as whole words on the full name.
    /// Postal codes are not scanned ("ON", "PE" are ordinary words).
    pub fn province_mentions<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = &'static ProvinceEntry> + 'a {
        let text = text.to_lowercase();
        self.provinces
            .iter()
            .filter(move |entry| contains_word(&text, &entry.name.to_lowercase()))
    }

    pub fn categories(&self) -> &'static [CategoryEntry] {
        self.categories
    }

    pub fn fallback(&self) -> &'static [&'static str] {
        self.fallback
    }

    /// Every URL in the catalog, duplicates included
    pub fn all_images(&self) -> impl Iterator<Item = &'static str> {
        let Self {
            categories,
            provinces,
            types,
            brands,
            fallback,
        } = *self;
        categories
            .iter()
            .flat_map(|e| e.images.iter().copied())
            .chain(provinces.iter().flat_map(|e| e.images.iter().copied()))
            .chain(types.iter().flat_map(|(_, images)| images.iter().copied()))
            .chain(brands.iter().map(|b| b.image))
            .chain(fallback.iter().copied())
    }
}

/// True when a province value means the grant is not tied to one province
pub fn is_nationwide(province: &str) -> bool {
    NATIONWIDE.contains(&normalize(province).as_str())
}

fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Substring match that refuses to split words, so "bmo" does not match
/// inside "submodule"
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
