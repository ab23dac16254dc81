use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        // Ports present on the selected package; the rest become `NullPort`.
        gpio_e: { any(feature = "pins_100", feature = "pins_144") },
        gpio_fg: { feature = "pins_144" },
    }
}
