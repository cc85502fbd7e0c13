use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::projection::ScreenPoint;

/// Immediate-mode 2D target the renderer paints on.
///
/// Coordinates are in the current transform's space; `save`/`restore` bracket
/// transform changes.
pub trait DrawingSurface {
	/// Clears `width` x `height` device pixels, ignoring the current transform.
	fn clear(&mut self, width: f64, height: f64);
	/// Pushes the current transform.
	fn save(&mut self);
	/// Pops the last pushed transform.
	fn restore(&mut self);
	/// Translates subsequent drawing.
	fn translate(&mut self, x: f64, y: f64);
	/// Uniformly scales subsequent drawing.
	fn scale(&mut self, k: f64);
	/// Fills a closed polygon, optionally outlining it with `(color, width)`.
	fn fill_polygon(&mut self, points: &[ScreenPoint], fill: &str, outline: Option<(&str, f64)>);
	/// Strokes an open polyline.
	fn stroke_polyline(&mut self, points: &[ScreenPoint], color: &str, width: f64);
	/// Fills a circle.
	fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &str);
	/// Draws text with its baseline starting at `at`.
	fn fill_text(&mut self, text: &str, at: ScreenPoint, font: &str, color: &str);
}

fn trace_path(ctx: &CanvasRenderingContext2d, points: &[ScreenPoint]) -> bool {
	let Some((first, rest)) = points.split_first() else {
		return false;
	};
	ctx.begin_path();
	ctx.move_to(first.x, first.y);
	for p in rest {
		ctx.line_to(p.x, p.y);
	}
	true
}

impl DrawingSurface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		CanvasRenderingContext2d::save(self);
		let _ = self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		self.clear_rect(0.0, 0.0, width, height);
		CanvasRenderingContext2d::restore(self);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn scale(&mut self, k: f64) {
		let _ = CanvasRenderingContext2d::scale(self, k, k);
	}

	fn fill_polygon(&mut self, points: &[ScreenPoint], fill: &str, outline: Option<(&str, f64)>) {
		if !trace_path(self, points) {
			return;
		}
		self.close_path();
		self.set_fill_style_str(fill);
		self.fill();
		if let Some((color, width)) = outline {
			self.set_stroke_style_str(color);
			self.set_line_width(width);
			self.stroke();
		}
	}

	fn stroke_polyline(&mut self, points: &[ScreenPoint], color: &str, width: f64) {
		if !trace_path(self, points) {
			return;
		}
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.stroke();
	}

	fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &str) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(color);
		self.fill();
	}

	fn fill_text(&mut self, text: &str, at: ScreenPoint, font: &str, color: &str) {
		self.set_fill_style_str(color);
		self.set_font(font);
		let _ = CanvasRenderingContext2d::fill_text(self, text, at.x, at.y);
	}
}
