pub static TEMPLATE_HELP: &str = "BMP file whose header is reused

Only the first bytes (see --header-size) are read. File size, pixel
offset, width, height and bit depth are rewritten, every other field
(compression, resolution, color counts) is kept as found, so the
template should be an uncompressed bitmap.";

pub static ROW_ORDER_HELP: &str = "Order of rows in the BMP pixel array

as-stored writes rows exactly as they appear in the dump, which is what
existing consumers read. BMP readers treat the first row as the bottom
one, so a top-down dump appears vertically mirrored.

bottom-up reverses the rows so a top-down dump displays upright.";

pub static PAD_ROWS_HELP: &str = "Pad each row to a multiple of 4 bytes

The BMP format requires it, but existing consumers read the unpadded
layout. Only matters when the width is not a multiple of 4.";

pub static QUALITY_HELP: &str = "JPEG quality, between 0 and 100

Higher values give larger files with fewer artifacts.";

pub static HEADER_ABOUT: &str = "Generate C headers from BMP and JPEG images

Every .bmp, .jpg and .jpeg file in --dir is converted to grayscale and
written as <name>.h declaring <name>_width, <name>_height and <name>[].";

pub static FUSE_ABOUT: &str = "Fuse two grayscale exposures into a dump

Both images (BMP or JPEG, same dimensions) are decomposed, compared by
local 3x3 variance and combined pixel by pixel, taking the one with more
detail or the average where neither wins. The result is contrast
stretched and written as a fused dump (width, height, pixels).";
