use assign_resources::assign_resources;
use embassy_rp::peripherals;
use embassy_rp::Peri;

// Raspberry Pi Pico: LEDs on GP4..GP6, active-high button on GP7.
assign_resources! {
    button: ButtonResources {
        pin: PIN_7,
    },
    leds: LedResources {
        green: PIN_4,
        yellow: PIN_5,
        red: PIN_6,
    },
}
