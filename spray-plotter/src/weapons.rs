/// Display name for a weapon code, `"Unknown"` for anything outside the table.
pub fn weapon_name(id: i32) -> &'static str {
    match id {
        301 => "Galil",
        302 => "Famas",
        303 => "AK47",
        304 => "M4A4",
        305 => "M4A1",
        306 => "Scout",
        307 => "SG553",
        308 => "AUG",
        309 => "AWP",
        310 => "Scar20",
        311 => "G3SG1",
        _ => "Unknown",
    }
}
