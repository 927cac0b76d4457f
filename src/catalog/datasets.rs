//! Premade dataset metadata tables
//!
//! Class labels and palettes for published land cover classification schemes.
//! Values match the upstream dataset documentation.

use super::Dataset;

/// LCMS annual land use, CONUS and Alaska
pub const LCMS_LU: Dataset = Dataset {
    key: "lcms-lu",
    name: "LCMS LU - Land Change Monitoring System Land Use",
    id: "USFS/GTAC/LCMS/v2024-10",
    band: "Land_Use",
    labels: &[
        (1, "Agriculture"),
        (2, "Developed"),
        (3, "Forest"),
        (4, "Other"),
        (5, "Rangeland or Pasture"),
        (6, "No Data"),
    ],
    palette: &[
        (1, "#efff6b"),
        (2, "#ff2ff8"),
        (3, "#1b9d0c"),
        (4, "#a1a1a1"),
        (5, "#c2b34a"),
        (6, "#1B1716"),
    ],
    years: &[
        1985, 1986, 1987, 1988, 1989, 1990, 1991, 1992, 1993, 1994, 1995, 1996, 1997, 1998, 1999,
        2000, 2001, 2002, 2003, 2004, 2005, 2006, 2007, 2008, 2009, 2010, 2011, 2012, 2013, 2014,
        2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023, 2024,
    ],
    nodata: Some(6),
};

/// NLCD, released roughly every three years for CONUS
pub const NLCD: Dataset = Dataset {
    key: "nlcd",
    name: "NLCD - National Land Cover Database",
    id: "USGS/NLCD_RELEASES/2019_REL/NLCD",
    band: "landcover",
    labels: &[
        (1, "No data"),
        (11, "Open water"),
        (12, "Perennial ice/snow"),
        (21, "Developed, open space"),
        (22, "Developed, low intensity"),
        (23, "Developed, medium intensity"),
        (24, "Developed, high intensity"),
        (31, "Barren land (rock/sand/clay)"),
        (41, "Deciduous forest"),
        (42, "Evergreen forest"),
        (43, "Mixed forest"),
        (51, "Dwarf scrub"),
        (52, "Shrub/scrub"),
        (71, "Grassland/herbaceous"),
        (72, "Sedge/herbaceous"),
        (73, "Lichens"),
        (74, "Moss"),
        (81, "Pasture/hay"),
        (82, "Cultivated crops"),
        (90, "Woody wetlands"),
        (95, "Emergent herbaceous wetlands"),
    ],
    palette: &[
        (1, "#000000"),
        (11, "#466b9f"),
        (12, "#d1def8"),
        (21, "#dec5c5"),
        (22, "#d99282"),
        (23, "#eb0000"),
        (24, "#ab0000"),
        (31, "#b3ac9f"),
        (41, "#68ab5f"),
        (42, "#1c5f2c"),
        (43, "#b5c58f"),
        (51, "#af963c"),
        (52, "#ccb879"),
        (71, "#dfdfc2"),
        (72, "#d1d182"),
        (73, "#a3cc51"),
        (74, "#82ba9e"),
        (81, "#dcd939"),
        (82, "#ab6c28"),
        (90, "#b8d9eb"),
        (95, "#6c9fb8"),
    ],
    years: &[2001, 2004, 2006, 2008, 2011, 2013, 2016, 2019],
    nodata: Some(1),
};

/// MODIS MCD12Q1 annual land cover, IGBP classification
pub const MODIS_LC_TYPE1: Dataset = Dataset {
    key: "modis-lc1",
    name: "MCD12Q1 - MODIS Global Land Cover Type 1",
    id: "MODIS/061/MCD12Q1",
    band: "LC_Type1",
    labels: &[
        (1, "Evergreen conifer forest"),
        (2, "Evergreen broadleaf forest"),
        (3, "Deciduous conifer forest"),
        (4, "Deciduous broadleaf forest"),
        (5, "Mixed forest"),
        (6, "Closed shrubland"),
        (7, "Open shrubland"),
        (8, "Woody savanna"),
        (9, "Savanna"),
        (10, "Grassland"),
        (11, "Permanent wetland"),
        (12, "Cropland"),
        (13, "Urban"),
        (14, "Cropland and natural vegetation"),
        (15, "Permanent snow and ice"),
        (16, "Barren"),
        (17, "Water"),
    ],
    palette: &[
        (1, "#086a10"),
        (2, "#dcd159"),
        (3, "#54a708"),
        (4, "#78d203"),
        (5, "#009900"),
        (6, "#c6b044"),
        (7, "#dcd159"),
        (8, "#dade48"),
        (9, "#fbff13"),
        (10, "#b6ff05"),
        (11, "#27ff87"),
        (12, "#c24f44"),
        (13, "#a5a5a5"),
        (14, "#ff6d4c"),
        (15, "#69fff8"),
        (16, "#f9ffa4"),
        (17, "#1c0dff"),
    ],
    years: &[
        2001, 2002, 2003, 2004, 2005, 2006, 2007, 2008, 2009, 2010, 2011, 2012, 2013, 2014, 2015,
        2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023,
    ],
    nodata: None,
};

/// All premade datasets, in display order
pub const ALL: &[Dataset] = &[LCMS_LU, NLCD, MODIS_LC_TYPE1];
