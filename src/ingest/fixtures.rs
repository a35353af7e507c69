/// Test fixtures: representative wgrib2 inventory output.
///
/// These mirror what `wgrib2 <file> -lon <lon> <lat>` prints for a NOMADS
/// filter subset carrying 2m TMP and surface APCP. One line per GRIB
/// record; the point value is appended as `val=` after the interpolated
/// longitude/latitude.
///
/// Notes on the real output:
///   - temperatures are in Kelvin (263.4 K = -9.75 °C);
///   - APCP is the accumulation since run init (or bucket start), so the
///     6-hour amount is a delta between consecutive forecast hours;
///   - the f000 subset has no APCP record at all - nothing has accumulated
///     at init time.

/// f006-style subset: both TMP and APCP present.
#[cfg(test)]
pub(crate) fn fixture_wgrib2_inventory() -> &'static str {
    "1:0:d=2024011506:TMP:2 m above ground:6 hour fcst:lon=284.500000,lat=39.100000,val=263.4\n\
     2:52133:d=2024011506:APCP:surface:0-6 hour acc fcst:lon=284.500000,lat=39.100000,val=2.75\n"
}

/// f000-style subset: TMP only, no accumulation record yet.
#[cfg(test)]
pub(crate) fn fixture_wgrib2_inventory_tmp_only() -> &'static str {
    "1:0:d=2024011506:TMP:2 m above ground:anl:lon=284.500000,lat=39.100000,val=263.4\n"
}
