use common::protocol::Seat;
use eframe::egui;

pub fn seat_color(seat: Seat) -> egui::Color32 {
    match seat {
        Seat::X => egui::Color32::from_rgb(220, 50, 50),
        Seat::O => egui::Color32::from_rgb(50, 50, 220),
        Seat::Red => egui::Color32::from_rgb(214, 48, 49),
        Seat::Green => egui::Color32::from_rgb(39, 174, 96),
        Seat::Yellow => egui::Color32::from_rgb(241, 196, 15),
        Seat::Blue => egui::Color32::from_rgb(41, 128, 185),
        Seat::Orange => egui::Color32::from_rgb(230, 126, 34),
        Seat::Purple => egui::Color32::from_rgb(142, 68, 173),
        Seat::Teal => egui::Color32::from_rgb(22, 160, 133),
        Seat::Pink => egui::Color32::from_rgb(232, 67, 147),
        Seat::Observer => egui::Color32::GRAY,
    }
}

/// Washed-out variant for base and home areas behind the pieces.
pub fn seat_tint(seat: Seat) -> egui::Color32 {
    let color = seat_color(seat);
    let mix = |channel: u8| ((channel as u16 + 2 * 255) / 3) as u8;
    egui::Color32::from_rgb(mix(color.r()), mix(color.g()), mix(color.b()))
}

/// Stable per-name color for chat senders.
pub fn generate_color_from_name(name: &str) -> egui::Color32 {
    let hash = name.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as u32)
    });

    let hue = (hash % 360) as f32;
    let saturation = 0.7_f32;
    let lightness = 0.45_f32;

    let c = (1.0_f32 - (2.0_f32 * lightness - 1.0_f32).abs()) * saturation;
    let x = c * (1.0_f32 - ((hue / 60.0_f32) % 2.0_f32 - 1.0_f32).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = if hue < 60.0 {
        (c, x, 0.0)
    } else if hue < 120.0 {
        (x, c, 0.0)
    } else if hue < 180.0 {
        (0.0, c, x)
    } else if hue < 240.0 {
        (0.0, x, c)
    } else if hue < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    egui::Color32::from_rgb(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
