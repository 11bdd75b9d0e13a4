//! The Kodak film-term table.
//!
//! Maps a film term number (FTN) from the SBA section of the IPI header to
//! the product code, gamut code and human-readable film name of the scanned
//! medium (Kodak document PCD067). A gamut code of -1 means no gamut code
//! exists for that film.

/// One film-term record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmTerm {
    /// Film term number.
    pub ftn: i32,
    /// Product code.
    pub product_code: i32,
    /// Gamut code, or -1 when unspecified.
    pub gamut_code: i32,
    /// Human-readable film name.
    pub name: &'static str,
}

/// Look up a film term number. Unknown numbers return `None`.
pub(crate) fn lookup(ftn: u16) -> Option<FilmTerm> {
    FILM_TERMS
        .iter()
        .find(|entry| entry.0 == ftn as i16)
        .map(|&(ftn, product_code, gamut_code, name)| FilmTerm {
            ftn: ftn as i32,
            product_code: product_code as i32,
            gamut_code: gamut_code as i32,
            name,
        })
}

#[rustfmt::skip]
static FILM_TERMS: [(i16, i16, i16, &str); 219] = [
    (1, 18, 7, "3M ScotchColor AT 100"),
    (2, 18, 9, "3M ScotchColor AT 200"),
    (3, 18, 8, "3M ScotchColor HR2 400"),
    (7, 18, 3, "3M Scotch HR 200 Gen 2"),
    (9, 18, 5, "3M Scotch HR 400 Gen 2"),
    (16, 113, -1, "AGFA AGFACOLOR XRS 400 Gen 1"),
    (17, 17, 7, "AGFA AGFACOLOR XRG/XRS 400"),
    (18, 17, 4, "AGFA AGFACOLOR XRG/XRS 200"),
    (19, 17, 10, "AGFA AGFACOLOR XRS 1000 Gen 2"),
    (20, 49, 7, "AGFA AGFACOLOR XRS 400 Gen 2"),
    (21, 17, 1, "AGFA AGFACOLOR XRS/XRC 100"),
    (26, 10, 6, "FUJI Reala 100 (JAPAN)"),
    (27, 10, 12, "FUJI Reala 100 Gen 1"),
    (28, 10, 14, "FUJI Reala 100 Gen 2"),
    (29, 10, 2, "FUJI SHR 400 Gen 2"),
    (30, 10, 5, "FUJI Super HG 100"),
    (31, 10, 8, "FUJI Super HG 1600 Gen 1"),
    (32, 10, 11, "FUJI Super HG 200"),
    (33, 10, 10, "FUJI Super HG 400"),
    (34, 10, 13, "FUJI Super HG 100 Gen 2"),
    (35, 8, 4, "FUJI Super HR 100 Gen 1"),
    (36, 10, 4, "FUJI Super HR 100 Gen 2"),
    (37, 8, -1, "FUJI Super HR 1600 Gen 2"),
    (38, 8, 3, "FUJI Super HR 200 Gen 1"),
    (39, 10, 3, "FUJI Super HR 200 Gen 2"),
    (40, 8, 2, "FUJI Super HR 400 Gen 1"),
    (43, 8, 6, "FUJI NSP 160S (PRO)"),
    (45, 82, 2, "KODAK KODACOLOR VR 100 Gen 2"),
    (47, 82, 3, "KODAK GOLD 400 Gen 3"),
    (55, 81, 9, "KODAK EKTAR 100 Gen 1"),
    (56, 81, 3, "KODAK EKTAR 1000 Gen 1"),
    (57, 81, 2, "KODAK EKTAR 125 Gen 1"),
    (58, 81, 1, "KODAK ROYAL GOLD 25 RZ"),
    (60, 80, 9, "KODAK GOLD 1600 Gen 1"),
    (61, 80, 12, "KODAK GOLD 200 Gen 2"),
    (62, 81, 7, "KODAK GOLD 400 Gen 2"),
    (65, 80, 4, "KODAK KODACOLOR VR 100 Gen 1"),
    (66, 80, 5, "KODAK KODACOLOR VR 1000 Gen 2"),
    (67, 80, 14, "KODAK KODACOLOR VR 1000 Gen 1"),
    (68, 80, 3, "KODAK KODACOLOR VR 200 Gen 1"),
    (69, 80, 2, "KODAK KODACOLOR VR 400 Gen 1"),
    (70, 82, 1, "KODAK KODACOLOR VR 200 Gen 2"),
    (71, 80, 6, "KODAK KODACOLOR VRG 100 Gen 1"),
    (72, 80, 11, "KODAK GOLD 100 Gen 2"),
    (73, 80, 8, "KODAK KODACOLOR VRG 200 Gen 1"),
    (74, 80, 7, "KODAK GOLD 400 Gen 1"),
    (87, 112, 4, "KODAK EKTACOLOR GOLD 160"),
    (88, 81, 6, "KODAK EKTAPRESS 1600 Gen 1 PPC"),
    (89, 81, 4, "KODAK EKTAPRESS GOLD 100 Gen 1 PPA"),
    (90, 81, 10, "KODAK EKTAPRESS GOLD 400 PPB-3"),
    (92, 81, 8, "KODAK EKTAR 25 Professional PHR"),
    (97, 67, 1, "KODAK T-MAX 100 Professional"),
    (98, 67, 3, "KODAK T-MAX 3200 Professional"),
    (99, 67, 2, "KODAK T-MAX 400 Professional"),
    (101, 112, 3, "KODAK VERICOLOR 400 Prof VPH"),
    (102, 112, 1, "KODAK VERICOLOR III Pro"),
    (121, 2, 11, "KONICA KONICA COLOR SR-G 3200"),
    (122, 40, -1, "KONICA KONICA COLOR SUPER SR100"),
    (123, 40, 6, "KONICA KONICA COLOR SUPER SR 400"),
    (138, 80, -1, "KODAK GOLD UNKNOWN"),
    (139, -1, -1, "KODAK UNKNOWN NEG A-"),
    (143, 81, 11, "KODAK EKTAR 100 Gen 2"),
    (147, 129, 1, "KODAK KODACOLOR CII"),
    (148, 129, 2, "KODAK KODACOLOR II"),
    (149, 82, 7, "KODAK GOLD Plus 200 Gen 3"),
    (150, 130, 1, "KODAK Internegative +10% Contrast"),
    (151, 17, 3, "AGFA AGFACOLOR Ultra 50"),
    (152, 10, 9, "FUJI NHG 400"),
    (153, 17, 2, "AGFA AGFACOLOR XRG 100"),
    (154, 82, 6, "KODAK GOLD Plus 100 Gen 3"),
    (155, 40, 13, "KONICA KONICA COLOR SUPER SR200 GEN 1"),
    (156, 40, 4, "KONICA KONICA COLOR SR-G 160"),
    (157, 17, 2, "AGFA AGFACOLOR OPTIMA 125"),
    (158, 17, 2, "AGFA AGFACOLOR PORTRAIT 160"),
    (162, 80, 7, "KODAK KODACOLOR VRG 400 Gen 1"),
    (163, 80, 8, "KODAK GOLD 200 Gen 1"),
    (164, 80, 11, "KODAK KODACOLOR VRG 100 Gen 2"),
    (174, 130, 2, "KODAK Internegative +20% Contrast"),
    (175, 130, 3, "KODAK Internegative +30% Contrast"),
    (176, 130, 4, "KODAK Internegative +40% Contrast"),
    (184, 67, 20, "KODAK TMAX-100 D-76 CI = .40"),
    (185, 67, 21, "KODAK TMAX-100 D-76 CI = .50"),
    (186, 67, 22, "KODAK TMAX-100 D-76 CI = .55"),
    (187, 67, 23, "KODAK TMAX-100 D-76 CI = .70"),
    (188, 67, 24, "KODAK TMAX-100 D-76 CI = .80"),
    (189, 67, 25, "KODAK TMAX-100 TMAX CI = .40"),
    (190, 67, 26, "KODAK TMAX-100 TMAX CI = .50"),
    (191, 67, 27, "KODAK TMAX-100 TMAX CI = .55"),
    (192, 67, 28, "KODAK TMAX-100 TMAX CI = .70"),
    (193, 67, 29, "KODAK TMAX-100 TMAX CI = .80"),
    (195, 67, 31, "KODAK TMAX-400 D-76 CI = .40"),
    (196, 67, 32, "KODAK TMAX-400 D-76 CI = .50"),
    (197, 67, 33, "KODAK TMAX-400 D-76 CI = .55"),
    (198, 67, 34, "KODAK TMAX-400 D-76 CI = .70"),
    (214, 67, 35, "KODAK TMAX-400 D-76 CI = .80"),
    (215, 67, 36, "KODAK TMAX-400 TMAX CI = .40"),
    (216, 67, 37, "KODAK TMAX-400 TMAX CI = .50"),
    (217, 67, 38, "KODAK TMAX-400 TMAX CI = .55"),
    (218, 67, 39, "KODAK TMAX-400 TMAX CI = .70"),
    (219, 67, 40, "KODAK TMAX-400 TMAX CI = .80"),
    (224, 66, 10, "3M ScotchColor ATG 400/EXL 400"),
    (266, 17, 5, "AGFA AGFACOLOR OPTIMA 200"),
    (267, 40, 3, "KONICA IMPRESSA 50"),
    (268, 18, 9, "POLAROID POLAROID CP 200"),
    (269, 40, 11, "KONICA KONICA COLOR SUPER SR200 GEN 2"),
    (270, 110, 3, "ILFORD XP2 400"),
    (271, 40, -1, "POLAROID POLAROID COLOR HD2 100"),
    (272, 40, 6, "POLAROID POLAROID COLOR HD2 400"),
    (273, 40, 11, "POLAROID POLAROID COLOR HD2 200"),
    (282, 66, 5, "3M ScotchColor ATG-1 200"),
    (284, 40, 7, "KONICA XG 400"),
    (307, 67, 99, "KODAK UNIVERSAL REVERSAL B / W"),
    (308, 20, 64, "KODAK RPC COPY FILM Gen 1"),
    (312, 52, 55, "KODAK UNIVERSAL E6"),
    (324, 82, 10, "KODAK GOLD Ultra 400 Gen 4"),
    (328, 12, 12, "FUJI Super G 100"),
    (329, 12, 3, "FUJI Super G 200"),
    (330, 12, 10, "FUJI Super G 400 Gen 2"),
    (333, 116, 22, "KODAK UNIVERSAL K14"),
    (334, 12, 2, "FUJI Super G 400 Gen 1"),
    (366, 150, 1, "KODAK VERICOLOR HC 6329 VHC"),
    (367, 150, 2, "KODAK VERICOLOR HC 4329 VHC"),
    (368, 150, 3, "KODAK VERICOLOR L 6013 VPL"),
    (369, 150, 4, "KODAK VERICOLOR L 4013 VPL"),
    (418, 82, 10, "KODAK EKTACOLOR Gold II 400 Prof"),
    (430, 83, 2, "KODAK ROYAL GOLD 1000"),
    (431, 82, 13, "KODAK KODACOLOR VR 200 / 5093"),
    (432, 83, 4, "KODAK GOLD Plus 100 Gen 4"),
    (443, 83, 8, "KODAK ROYAL GOLD 100"),
    (444, 83, 10, "KODAK ROYAL GOLD 400"),
    (445, 52, 70, "KODAK UNIVERSAL E6 auto-balance"),
    (446, 52, 71, "KODAK UNIVERSAL E6 illum. corr."),
    (447, 116, 70, "KODAK UNIVERSAL K14 auto-balance"),
    (448, 116, 71, "KODAK UNIVERSAL K14 illum. corr."),
    (449, 83, 8, "KODAK EKTAR 100 Gen 3 SY"),
    (456, 81, 1, "KODAK EKTAR 25"),
    (457, 83, 8, "KODAK EKTAR 100 Gen 3 CX"),
    (458, 83, 8, "KODAK EKTAPRESS PLUS 100 Prof PJA-1"),
    (459, 83, 8, "KODAK EKTAPRESS GOLD II 100 Prof"),
    (460, 83, 8, "KODAK Pro 100 PRN"),
    (461, 83, 8, "KODAK VERICOLOR HC 100 Prof VHC-2"),
    (462, 83, 8, "KODAK Prof Color Neg 100"),
    (463, 83, 2, "KODAK EKTAR 1000 Gen 2"),
    (464, 83, 2, "KODAK EKTAPRESS PLUS 1600 Pro PJC-1"),
    (465, 83, 2, "KODAK EKTAPRESS GOLD II 1600 Prof"),
    (466, 83, 2, "KODAK SUPER GOLD 1600 GF Gen 2"),
    (467, 83, 4, "KODAK KODACOLOR 100 Print Gen 4"),
    (468, 83, 4, "KODAK SUPER GOLD 100 Gen 4"),
    (469, 83, 4, "KODAK GOLD 100 Gen 4"),
    (470, 83, 4, "KODAK GOLD III 100 Gen 4"),
    (471, 83, 9, "KODAK FUNTIME 100 FA"),
    (472, 82, 13, "KODAK FUNTIME 200 FB"),
    (473, 82, 13, "KODAK KODACOLOR VR 200 Gen 4"),
    (474, 83, 5, "KODAK GOLD Super 200 Gen 4"),
    (475, 83, 5, "KODAK KODACOLOR 200 Print Gen 4"),
    (476, 83, 5, "KODAK SUPER GOLD 200 Gen 4"),
    (477, 83, 5, "KODAK GOLD 200 Gen 4"),
    (478, 83, 5, "KODAK GOLD III 200 Gen 4"),
    (479, 83, 6, "KODAK GOLD Ultra 400 Gen 5"),
    (480, 83, 6, "KODAK SUPER GOLD 400 Gen 5"),
    (481, 83, 6, "KODAK GOLD 400 Gen 5"),
    (482, 83, 6, "KODAK GOLD III 400 Gen 5"),
    (483, 83, 6, "KODAK KODACOLOR 400 Print Gen 5"),
    (484, 83, 6, "KODAK EKTAPRESS PLUS 400 Prof PJB-2"),
    (485, 83, 6, "KODAK EKTAPRESS GOLD II 400 Prof G5"),
    (486, 83, 6, "KODAK Pro 400 PPF-2"),
    (487, 83, 6, "KODAK EKTACOLOR GOLD II 400 EGP-4"),
    (488, 83, 6, "KODAK EKTACOLOR GOLD 400 Prof EGP-4"),
    (489, 83, 3, "KODAK EKTAPRESS GOLD II Multspd PJM"),
    (490, 112, 11, "KODAK Pro 400 MC PMC"),
    (491, 112, 11, "KODAK VERICOLOR 400 Prof VPH-2"),
    (492, 112, 11, "KODAK VERICOLOR 400 PLUS Prof VPH-2"),
    (493, 83, -1, "KODAK UNKNOWN NEG Product Code 83"),
    (505, 112, 12, "KODAK EKTACOLOR PRO GOLD 160 GPX"),
    (508, 83, 11, "KODAK ROYAL GOLD 200"),
    (517, 52, 72, "KODAK 4050000000"),
    (519, 83, 12, "KODAK GOLD Plus 100 Gen 5"),
    (520, 83, 14, "KODAK GOLD 800 Gen 1"),
    (521, 83, 13, "KODAK GOLD Super 200 Gen 5"),
    (522, 91, 10, "KODAK EKTAPRESS PLUS 200 Prof"),
    (523, 52, 73, "KODAK 4050 E6 auto-balance"),
    (524, 52, 74, "KODAK 4050 E6 ilum. corr."),
    (525, 116, 72, "KODAK 4050 K14"),
    (526, 116, 73, "KODAK 4050 K14 auto-balance"),
    (527, 116, 74, "KODAK 4050 K14 ilum. corr."),
    (528, 67, 72, "KODAK 4050 REVERSAL B&W"),
    (532, 91, 2, "KODAK ADVANTIX 200"),
    (533, 91, 3, "KODAK ADVANTIX 400"),
    (534, 91, 1, "KODAK ADVANTIX 100"),
    (535, 78, 8, "KODAK EKTAPRESS Multspd Prof PJM-2"),
    (536, 79, 2, "KODAK KODACOLOR VR 200 Gen 5"),
    (537, 79, 2, "KODAK FUNTIME 200 FB Gen 2"),
    (538, 79, 2, "KODAK Commercial 200"),
    (539, 132, 1, "KODAK Royal Gold 25 Copystand"),
    (540, 78, 1, "KODAK KODACOLOR DA 100 Gen 5"),
    (545, 79, 4, "KODAK KODACOLOR VR 400 Gen 2"),
    (546, 78, 1, "KODAK GOLD 100 Gen 6"),
    (547, 78, 2, "KODAK GOLD 200 Gen 6"),
    (548, 78, 3, "KODAK GOLD 400 Gen 6"),
    (549, 78, 4, "KODAK ROYAL GOLD 100 Gen 2"),
    (550, 78, 5, "KODAK ROYAL GOLD 200 Gen 2"),
    (551, 78, 6, "KODAK ROYAL GOLD 400 Gen 2"),
    (552, 78, 7, "KODAK GOLD MAX 800 GEN 2"),
    (554, 52, 75, "KODAK 4050 E6 high contrast"),
    (555, 52, 76, "KODAK 4050 E6 low saturation high contrast"),
    (556, 52, 77, "KODAK 4050 E6 low saturation"),
    (557, 52, 78, "KODAK Universal E-6 Low Saturation"),
    (558, 78, -1, "KODAK T-MAX T400 CN"),
    (563, 78, 4, "KODAK EKTAPRESS PJ100"),
    (564, 78, 6, "KODAK EKTAPRESS PJ400"),
    (565, 78, 7, "KODAK EKTAPRESS PJ800"),
    (567, 79, 11, "KODAK PORTRA 160NC"),
    (568, 79, 11, "KODAK PORTRA 160VC"),
    (569, 79, 13, "KODAK PORTRA 400NC"),
    (570, 79, 13, "KODAK PORTRA 400VC"),
    (575, 91, 5, "KODAK ADVANTIX 100-2"),
    (576, 91, 6, "KODAK ADVANTIX 200-2"),
    (577, 94, 1, "KODAK ADVANTIX Black & White + 400"),
    (578, 78, 15, "KODAK EKTAPRESS PJ800-2"),
];
